//! Obstacles remembered from sensing, for greedy planning.

use gridnav_core::{Cell, GridOracle, Tick};
use indexmap::IndexSet;

/// Walls seen so far plus the agents seen this tick.
///
/// Walls persist across ticks and are re-checked every time their cell
/// is sensed again. Occupants are forgotten at the next observation.
#[derive(Clone, Debug, Default)]
pub struct ObstacleMemory {
    walls: IndexSet<Cell>,
    occupied: IndexSet<Cell>,
    observed_at: Option<Tick>,
}

impl ObstacleMemory {
    /// Empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sweep the square of Chebyshev radius `radius` around `center`,
    /// recording every sensed on-map cell. `center` itself is never
    /// recorded as occupied.
    pub fn observe_around<O: GridOracle + ?Sized>(
        &mut self,
        oracle: &O,
        center: Cell,
        radius: u32,
        tick: Tick,
    ) {
        self.occupied.clear();
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        let bounds = oracle.bounds();
        let lo = bounds.clamp(center.translate(-r, -r));
        let hi = bounds.clamp(center.translate(r, r));
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                let cell = Cell::new(x, y);
                let Some(obs) = oracle.observe(cell) else {
                    continue;
                };
                if !obs.on_map {
                    continue;
                }
                if obs.passable {
                    self.walls.swap_remove(&cell);
                } else {
                    self.walls.insert(cell);
                }
                if obs.occupied && cell != center {
                    self.occupied.insert(cell);
                }
            }
        }
        self.observed_at = Some(tick);
    }

    /// Every wall remembered.
    pub fn walls(&self) -> &IndexSet<Cell> {
        &self.walls
    }

    /// Cells occupied at the last observation.
    pub fn occupied(&self) -> &IndexSet<Cell> {
        &self.occupied
    }

    /// When [`observe_around`](Self::observe_around) last ran.
    pub fn observed_at(&self) -> Option<Tick> {
        self.observed_at
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.walls.clear();
        self.occupied.clear();
        self.observed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::AgentId;
    use gridnav_space::{AsciiMap, SensingView};

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    const ROOM: &str = r"
        ........
        ..#.....
        ..#..#..
        ........
    ";

    #[test]
    fn records_only_sensed_walls() {
        let parsed = AsciiMap::parse(ROOM).unwrap();
        let view = SensingView::new(&parsed.map, c(1, 1), 2);
        let mut mem = ObstacleMemory::new();
        mem.observe_around(&view, c(1, 1), 4, Tick(1));
        assert!(mem.walls().contains(&c(2, 1)));
        assert!(mem.walls().contains(&c(2, 2)));
        // (5, 1) is a wall but out of sensing range.
        assert!(!mem.walls().contains(&c(5, 1)));
        assert_eq!(view.violations(), 0);
        assert_eq!(mem.observed_at(), Some(Tick(1)));
    }

    #[test]
    fn walls_accumulate_across_ticks() {
        let parsed = AsciiMap::parse(ROOM).unwrap();
        let mut mem = ObstacleMemory::new();
        mem.observe_around(&SensingView::new(&parsed.map, c(1, 1), 2), c(1, 1), 4, Tick(1));
        mem.observe_around(&SensingView::new(&parsed.map, c(5, 2), 2), c(5, 2), 4, Tick(2));
        assert!(mem.walls().contains(&c(2, 1)));
        assert!(mem.walls().contains(&c(5, 1)));
    }

    #[test]
    fn cleared_walls_are_forgotten_when_resensed() {
        let mut parsed = AsciiMap::parse(ROOM).unwrap();
        let mut mem = ObstacleMemory::new();
        mem.observe_around(&SensingView::new(&parsed.map, c(1, 1), 2), c(1, 1), 4, Tick(1));
        parsed.map.clear_wall(c(2, 1)).unwrap();
        mem.observe_around(&SensingView::new(&parsed.map, c(1, 1), 2), c(1, 1), 4, Tick(2));
        assert!(!mem.walls().contains(&c(2, 1)));
    }

    #[test]
    fn occupants_last_one_tick() {
        let mut parsed = AsciiMap::parse(ROOM).unwrap();
        parsed.map.place(AgentId(1), c(1, 1)).unwrap();
        parsed.map.place(AgentId(2), c(0, 1)).unwrap();
        let mut mem = ObstacleMemory::new();
        {
            let view = SensingView::new(&parsed.map, c(1, 1), 2);
            mem.observe_around(&view, c(1, 1), 4, Tick(1));
        }
        assert!(mem.occupied().contains(&c(0, 1)));
        assert!(!mem.occupied().contains(&c(1, 1)));
        parsed.map.remove(AgentId(2)).unwrap();
        let view = SensingView::new(&parsed.map, c(1, 1), 2);
        mem.observe_around(&view, c(1, 1), 4, Tick(2));
        assert!(mem.occupied().is_empty());
    }
}
