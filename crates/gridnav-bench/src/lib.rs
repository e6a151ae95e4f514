//! Benchmark profiles and utilities for gridnav.
//!
//! Provides pre-built maps for benchmarking and examples:
//!
//! - [`reference_profile`]: 64x64 grid with 15% scattered walls
//! - [`stress_profile`]: 256x256 grid with 20% scattered walls
//! - [`init_agent_routes`]: deterministic start/target pairs via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridnav_core::{AgentId, Cell};
use gridnav_space::{GridMap, SpaceError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A `width` x `height` map where each cell is a wall with probability
/// `wall_percent`%.
pub fn scatter_profile(
    width: u32,
    height: u32,
    wall_percent: u32,
    seed: u64,
) -> Result<GridMap, SpaceError> {
    let mut map = GridMap::new(width, height)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let walls: Vec<Cell> = map
        .bounds()
        .iter()
        .filter(|_| rng.random_range(0..100) < wall_percent)
        .collect();
    map.set_walls(walls)?;
    Ok(map)
}

/// Build a reference benchmark map: 64x64 (4K cells), 15% walls.
pub fn reference_profile(seed: u64) -> Result<GridMap, SpaceError> {
    scatter_profile(64, 64, 15, seed)
}

/// Build a stress benchmark map: 256x256 (64K cells), 20% walls.
pub fn stress_profile(seed: u64) -> Result<GridMap, SpaceError> {
    scatter_profile(256, 256, 20, seed)
}

/// Pick up to `n` agents with distinct open start cells and open
/// targets distinct from every start.
pub fn init_agent_routes(map: &GridMap, n: u32, seed: u64) -> Vec<(AgentId, Cell, Cell)> {
    let mut free: Vec<Cell> = map
        .bounds()
        .iter()
        .filter(|c| map.is_passable(*c) && map.occupant_at(*c).is_none())
        .collect();
    free.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    let n = (n as usize).min(free.len() / 2);
    let (starts, rest) = free.split_at(n);
    (0..n)
        .map(|i| (AgentId(i as u32), starts[i], rest[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn profiles_have_expected_size_and_some_walls() {
        let map = reference_profile(42).unwrap();
        assert_eq!(map.bounds().cell_count(), 64 * 64);
        assert!(map.wall_count() > 0);
        assert!(map.wall_count() < 64 * 64 / 2);
    }

    #[test]
    fn scatter_is_deterministic() {
        let a = reference_profile(7).unwrap();
        let b = reference_profile(7).unwrap();
        assert_eq!(a.to_ascii(), b.to_ascii());
    }

    #[test]
    fn routes_are_open_and_unique() {
        let map = reference_profile(42).unwrap();
        let routes = init_agent_routes(&map, 16, 42);
        assert_eq!(routes.len(), 16);
        let starts: HashSet<Cell> = routes.iter().map(|r| r.1).collect();
        assert_eq!(starts.len(), 16);
        for &(_, s, t) in &routes {
            assert!(map.is_passable(s));
            assert!(map.is_passable(t));
            assert!(!starts.contains(&t));
        }
    }

    #[test]
    fn routes_are_deterministic() {
        let map = reference_profile(1).unwrap();
        assert_eq!(init_agent_routes(&map, 5, 9), init_agent_routes(&map, 5, 9));
    }
}
