//! Randomised moves for getting out of tight spots.

use crate::ring::VisitedRing;
use crate::stepper::can_move;
use gridnav_core::{Bounds, Cell, Direction, GridOracle};
use rand::Rng;

/// Random draws made by [`random_walk`] before giving up.
pub const RANDOM_WALK_TRIES: usize = 5;

/// A random enterable direction that does not lead back into the visited
/// ring, trying up to [`RANDOM_WALK_TRIES`] draws.
pub fn random_walk<O, R>(
    oracle: &O,
    current: Cell,
    visited: &VisitedRing,
    rng: &mut R,
) -> Option<Direction>
where
    O: GridOracle + ?Sized,
    R: Rng + ?Sized,
{
    (0..RANDOM_WALK_TRIES)
        .map(|_| Direction::ALL[rng.random_range(0..Direction::ALL.len())])
        .find(|d| !visited.contains(current.add(*d)) && can_move(oracle, current, *d))
}

/// A map corner away from `current`.
///
/// Picks uniformly between the diagonally opposite corner and the two
/// corners that keep one of `current`'s halves; never the nearest corner.
pub fn far_corner<R: Rng + ?Sized>(bounds: Bounds, current: Cell, rng: &mut R) -> Cell {
    let (min, max) = (bounds.min(), bounds.max());
    let mid = bounds.center();
    let (far_x, near_x) = if current.x <= mid.x {
        (max.x, min.x)
    } else {
        (min.x, max.x)
    };
    let (far_y, near_y) = if current.y <= mid.y {
        (max.y, min.y)
    } else {
        (min.y, max.y)
    };
    match rng.random_range(0..3) {
        0 => Cell::new(far_x, far_y),
        1 => Cell::new(far_x, near_y),
        _ => Cell::new(near_x, far_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_space::{AsciiMap, GridMap, SensingView};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn random_walk_is_deterministic_per_seed() {
        let map = GridMap::new(9, 9).unwrap();
        let view = SensingView::new(&map, c(4, 4), 20);
        let visited = VisitedRing::default();
        let a = random_walk(&view, c(4, 4), &visited, &mut ChaCha8Rng::seed_from_u64(3));
        let b = random_walk(&view, c(4, 4), &visited, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn random_walk_enclosed_is_none() {
        let parsed = AsciiMap::parse("###\n#.#\n###").unwrap();
        let view = SensingView::new(&parsed.map, c(1, 1), 20);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(random_walk(&view, c(1, 1), &VisitedRing::default(), &mut rng), None);
    }

    #[test]
    fn random_walk_avoids_visited_cells() {
        let map = GridMap::new(3, 3).unwrap();
        let view = SensingView::new(&map, c(1, 1), 20);
        let mut visited = VisitedRing::default();
        for n in c(1, 1).neighbours().into_iter().filter(|n| *n != c(2, 1)) {
            visited.push(n);
        }
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let dir = random_walk(&view, c(1, 1), &visited, &mut rng);
            assert!(matches!(dir, None | Some(Direction::East)), "{dir:?}");
        }
    }

    proptest! {
        #[test]
        fn far_corner_avoids_home_quadrant(
            x in 0i32..20, y in 0i32..12, seed in any::<u64>(),
        ) {
            let bounds = Bounds::from_size(20, 12).unwrap();
            let here = c(x, y);
            let corner = far_corner(bounds, here, &mut ChaCha8Rng::seed_from_u64(seed));
            prop_assert!(bounds.corners().contains(&corner));
            let mid = bounds.center();
            let home = c(if x <= mid.x { 0 } else { 19 }, if y <= mid.y { 0 } else { 11 });
            prop_assert_ne!(corner, home);
        }
    }
}
