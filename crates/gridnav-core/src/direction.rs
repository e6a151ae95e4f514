//! Eight-way compass directions plus the zero direction.

use std::fmt;

/// A compass direction on an 8-connected grid, or [`Center`](Direction::Center).
///
/// Positive `y` is north. Rotation walks the 8-cycle
/// N → NE → E → SE → S → SW → W → NW → N (right is clockwise).
/// `Center` has a zero offset and is fixed under rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// `(0, +1)`.
    North = 0,
    /// `(+1, +1)`.
    NorthEast = 1,
    /// `(+1, 0)`.
    East = 2,
    /// `(+1, -1)`.
    SouthEast = 3,
    /// `(0, -1)`.
    South = 4,
    /// `(-1, -1)`.
    SouthWest = 5,
    /// `(-1, 0)`.
    West = 6,
    /// `(-1, +1)`.
    NorthWest = 7,
    /// No movement.
    Center = 8,
}

impl Direction {
    /// The eight moving directions in enumeration order (N, NE, E, SE, S, SW, W, NW).
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Returns the `(dx, dy)` unit offset for this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::Center => (0, 0),
        }
    }

    /// Position in [`ALL`](Self::ALL), or `None` for `Center`.
    pub fn index(self) -> Option<usize> {
        match self {
            Direction::Center => None,
            d => Some(d as usize),
        }
    }

    /// Inverse of [`index`](Self::index), taken modulo 8.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    /// The direction with exactly this unit offset, if any.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 0) => Some(Direction::Center),
            (0, 1) => Some(Direction::North),
            (1, 1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, -1) => Some(Direction::SouthEast),
            (0, -1) => Some(Direction::South),
            (-1, -1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, 1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// Rotate 45° counter-clockwise.
    pub fn rotate_left(self) -> Self {
        match self.index() {
            Some(i) => Self::from_index(i + 7),
            None => Direction::Center,
        }
    }

    /// Rotate 45° clockwise.
    pub fn rotate_right(self) -> Self {
        match self.index() {
            Some(i) => Self::from_index(i + 1),
            None => Direction::Center,
        }
    }

    /// The direction pointing the other way (four rotations).
    pub fn opposite(self) -> Self {
        match self.index() {
            Some(i) => Self::from_index(i + 4),
            None => Direction::Center,
        }
    }

    /// `true` for NE, SE, SW and NW.
    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offset();
        dx != 0 && dy != 0
    }

    /// The compass direction that best approximates the vector `(dx, dy)`.
    ///
    /// Picks the direction with the smallest angular deviation. A step is
    /// diagonal only when the vector is strictly more than 22.5° away from
    /// both axes; otherwise the dominant axis wins. The test is exact:
    /// `θ > 22.5°` is `(a + b)² > 2a²` for axis components `a`, `b`.
    /// Returns `Center` for the zero vector.
    pub fn toward(dx: i32, dy: i32) -> Self {
        if dx == 0 && dy == 0 {
            return Direction::Center;
        }
        let ax = i128::from(dx).abs();
        let ay = i128::from(dy).abs();
        let sum_sq = (ax + ay) * (ax + ay);
        let diagonal = ax > 0 && ay > 0 && sum_sq > 2 * ax * ax && sum_sq > 2 * ay * ay;

        let (sx, sy) = if diagonal {
            (dx.signum(), dy.signum())
        } else if ax >= ay {
            (dx.signum(), 0)
        } else {
            (0, dy.signum())
        };
        // Every (sx, sy) produced above is a unit offset.
        Self::from_offset(sx, sy).unwrap_or(Direction::Center)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
            Direction::Center => "C",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_direction() -> impl Strategy<Value = Direction> {
        (0usize..9).prop_map(|i| {
            if i == 8 {
                Direction::Center
            } else {
                Direction::from_index(i)
            }
        })
    }

    // ── Rotation ────────────────────────────────────────────────

    #[test]
    fn rotate_right_walks_clockwise() {
        assert_eq!(Direction::North.rotate_right(), Direction::NorthEast);
        assert_eq!(Direction::NorthWest.rotate_right(), Direction::North);
        assert_eq!(Direction::East.rotate_right(), Direction::SouthEast);
    }

    #[test]
    fn rotate_left_walks_counter_clockwise() {
        assert_eq!(Direction::North.rotate_left(), Direction::NorthWest);
        assert_eq!(Direction::SouthWest.rotate_left(), Direction::South);
    }

    #[test]
    fn center_is_fixed() {
        assert_eq!(Direction::Center.rotate_left(), Direction::Center);
        assert_eq!(Direction::Center.rotate_right(), Direction::Center);
        assert_eq!(Direction::Center.opposite(), Direction::Center);
        assert_eq!(Direction::Center.offset(), (0, 0));
    }

    #[test]
    fn opposite_negates_offset() {
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            assert_eq!(d.opposite().offset(), (-dx, -dy));
        }
    }

    // ── toward ──────────────────────────────────────────────────

    #[test]
    fn toward_zero_is_center() {
        assert_eq!(Direction::toward(0, 0), Direction::Center);
    }

    #[test]
    fn toward_pure_axes() {
        assert_eq!(Direction::toward(0, 7), Direction::North);
        assert_eq!(Direction::toward(0, -2), Direction::South);
        assert_eq!(Direction::toward(9, 0), Direction::East);
        assert_eq!(Direction::toward(-1, 0), Direction::West);
    }

    #[test]
    fn toward_exact_diagonals() {
        assert_eq!(Direction::toward(3, 3), Direction::NorthEast);
        assert_eq!(Direction::toward(-4, -4), Direction::SouthWest);
        assert_eq!(Direction::toward(2, -2), Direction::SouthEast);
        assert_eq!(Direction::toward(-1, 1), Direction::NorthWest);
    }

    #[test]
    fn toward_splits_octants_at_22_5_degrees() {
        // atan(1/3) ≈ 18.4° → axis; atan(1/2) ≈ 26.6° → diagonal.
        assert_eq!(Direction::toward(3, 1), Direction::East);
        assert_eq!(Direction::toward(2, 1), Direction::NorthEast);
        assert_eq!(Direction::toward(1, -3), Direction::South);
        assert_eq!(Direction::toward(-1, -2), Direction::SouthWest);
        assert_eq!(Direction::toward(5, 2), Direction::East);
    }

    #[test]
    fn toward_handles_extreme_components() {
        assert_eq!(Direction::toward(i32::MAX, i32::MIN), Direction::SouthEast);
        assert_eq!(Direction::toward(i32::MIN, 0), Direction::West);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn rotate_left_undoes_rotate_right(d in arb_direction()) {
            prop_assert_eq!(d.rotate_right().rotate_left(), d);
            prop_assert_eq!(d.rotate_left().rotate_right(), d);
        }

        #[test]
        fn eight_rotations_are_identity(d in arb_direction()) {
            let mut left = d;
            let mut right = d;
            for _ in 0..8 {
                left = left.rotate_left();
                right = right.rotate_right();
            }
            prop_assert_eq!(left, d);
            prop_assert_eq!(right, d);
        }

        #[test]
        fn opposite_is_four_rotations(d in arb_direction()) {
            let mut r = d;
            let mut l = d;
            for _ in 0..4 {
                r = r.rotate_right();
                l = l.rotate_left();
            }
            prop_assert_eq!(d.opposite(), r);
            prop_assert_eq!(d.opposite(), l);
        }

        #[test]
        fn toward_is_never_more_than_22_5_degrees_off(dx in -50i32..50, dy in -50i32..50) {
            prop_assume!(dx != 0 || dy != 0);
            let d = Direction::toward(dx, dy);
            let (ox, oy) = d.offset();
            // cos(angle) = dot / (|v| |o|) must be at least cos(22.5°).
            let dot = f64::from(dx * ox + dy * oy);
            let norm = f64::from(dx * dx + dy * dy).sqrt() * f64::from(ox * ox + oy * oy).sqrt();
            prop_assert!(dot / norm >= (22.5f64).to_radians().cos() - 1e-12);
        }
    }
}
