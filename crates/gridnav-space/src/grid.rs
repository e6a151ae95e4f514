//! Bounded 8-connected map of walls and agents.

use crate::error::SpaceError;
use gridnav_core::{AgentId, Bounds, Cell, Direction, GridError};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// A rectangular map of wall cells plus the agents standing on it.
///
/// Walls are stored densely in row-major order (see [`Bounds::index_of`]).
/// Agents are kept in insertion order so that iteration, and therefore
/// any multi-agent driver built on top, is deterministic. At most one
/// agent occupies a cell and agents never stand on walls.
#[derive(Debug, Clone)]
pub struct GridMap {
    bounds: Bounds,
    walls: Vec<bool>,
    occupants: IndexMap<Cell, AgentId>,
    positions: IndexMap<AgentId, Cell>,
}

impl GridMap {
    /// An empty `width * height` map anchored at `(0, 0)`.
    ///
    /// Returns `Err(SpaceError::Grid(GridError::EmptyBounds))` if either
    /// dimension is 0.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        Ok(Self::with_bounds(Bounds::from_size(width, height)?))
    }

    /// An empty map covering `bounds`.
    pub fn with_bounds(bounds: Bounds) -> Self {
        Self {
            bounds,
            walls: vec![false; bounds.cell_count()],
            occupants: IndexMap::new(),
            positions: IndexMap::new(),
        }
    }

    /// Extent of the map.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn slot(&self, cell: Cell) -> Result<usize, SpaceError> {
        self.bounds.index_of(cell).ok_or(SpaceError::Grid(GridError::CellOutOfBounds {
            cell,
            bounds: self.bounds,
        }))
    }

    // ── Walls ───────────────────────────────────────────────────

    /// Mark `cell` as a wall.
    ///
    /// Fails if the cell is off the map or an agent stands on it.
    pub fn set_wall(&mut self, cell: Cell) -> Result<(), SpaceError> {
        let i = self.slot(cell)?;
        if let Some(&occupant) = self.occupants.get(&cell) {
            return Err(SpaceError::CellOccupied { cell, occupant });
        }
        self.walls[i] = true;
        Ok(())
    }

    /// Mark every cell in `cells` as a wall, stopping at the first error.
    pub fn set_walls(&mut self, cells: impl IntoIterator<Item = Cell>) -> Result<(), SpaceError> {
        cells.into_iter().try_for_each(|c| self.set_wall(c))
    }

    /// Turn `cell` back into open floor.
    pub fn clear_wall(&mut self, cell: Cell) -> Result<(), SpaceError> {
        let i = self.slot(cell)?;
        self.walls[i] = false;
        Ok(())
    }

    /// `true` if `cell` is a wall. Off-map cells are not walls.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.bounds
            .index_of(cell)
            .is_some_and(|i| self.walls[i])
    }

    /// `true` if `cell` is on the map and not a wall.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.bounds.contains(cell) && !self.is_wall(cell)
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|w| **w).count()
    }

    // ── Agents ──────────────────────────────────────────────────

    /// Put a new agent on `cell`.
    pub fn place(&mut self, agent: AgentId, cell: Cell) -> Result<(), SpaceError> {
        if self.positions.contains_key(&agent) {
            return Err(SpaceError::DuplicateAgent { agent });
        }
        self.check_enterable(cell)?;
        self.occupants.insert(cell, agent);
        self.positions.insert(agent, cell);
        Ok(())
    }

    /// Take an agent off the map, returning where it stood.
    pub fn remove(&mut self, agent: AgentId) -> Result<Cell, SpaceError> {
        let cell = self
            .positions
            .shift_remove(&agent)
            .ok_or(SpaceError::UnknownAgent { agent })?;
        self.occupants.shift_remove(&cell);
        Ok(cell)
    }

    /// The agent standing on `cell`, if any.
    pub fn occupant_at(&self, cell: Cell) -> Option<AgentId> {
        self.occupants.get(&cell).copied()
    }

    /// Where `agent` stands, if it is on the map.
    pub fn position_of(&self, agent: AgentId) -> Option<Cell> {
        self.positions.get(&agent).copied()
    }

    /// All agents and their cells, in placement order.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, Cell)> + '_ {
        self.positions.iter().map(|(a, c)| (*a, *c))
    }

    /// Move `agent` one step in `dir`, returning its new cell.
    ///
    /// `Center` is a no-op. The map is unchanged on error.
    pub fn apply_move(&mut self, agent: AgentId, dir: Direction) -> Result<Cell, SpaceError> {
        let from = self
            .position_of(agent)
            .ok_or(SpaceError::UnknownAgent { agent })?;
        if dir == Direction::Center {
            return Ok(from);
        }
        let to = from.add(dir);
        self.check_enterable(to)?;
        self.occupants.shift_remove(&from);
        self.occupants.insert(to, agent);
        self.positions.insert(agent, to);
        Ok(to)
    }

    fn check_enterable(&self, cell: Cell) -> Result<(), SpaceError> {
        self.bounds.check(cell)?;
        if self.is_wall(cell) {
            return Err(SpaceError::CellIsWall { cell });
        }
        if let Some(&occupant) = self.occupants.get(&cell) {
            return Err(SpaceError::CellOccupied { cell, occupant });
        }
        Ok(())
    }

    /// In-bounds 8-connected neighbours of `cell`, in enumeration order.
    pub fn neighbours(&self, cell: Cell) -> SmallVec<[Cell; 8]> {
        cell.neighbours()
            .into_iter()
            .filter(|n| self.bounds.contains(*n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn zero_size_map_is_rejected() {
        match GridMap::new(0, 3) {
            Err(SpaceError::Grid(GridError::EmptyBounds)) => {}
            other => panic!("expected EmptyBounds, got {other:?}"),
        }
    }

    #[test]
    fn walls_set_and_clear() {
        let mut m = GridMap::new(4, 4).unwrap();
        m.set_wall(c(1, 2)).unwrap();
        assert!(m.is_wall(c(1, 2)));
        assert!(!m.is_passable(c(1, 2)));
        assert_eq!(m.wall_count(), 1);
        m.clear_wall(c(1, 2)).unwrap();
        assert!(m.is_passable(c(1, 2)));
    }

    #[test]
    fn off_map_is_neither_wall_nor_passable() {
        let m = GridMap::new(2, 2).unwrap();
        assert!(!m.is_wall(c(5, 5)));
        assert!(!m.is_passable(c(5, 5)));
    }

    #[test]
    fn wall_under_agent_is_rejected() {
        let mut m = GridMap::new(3, 3).unwrap();
        m.place(AgentId(1), c(1, 1)).unwrap();
        match m.set_wall(c(1, 1)) {
            Err(SpaceError::CellOccupied { occupant, .. }) => assert_eq!(occupant, AgentId(1)),
            other => panic!("expected CellOccupied, got {other:?}"),
        }
    }

    #[test]
    fn place_rejects_walls_duplicates_and_collisions() {
        let mut m = GridMap::new(3, 3).unwrap();
        m.set_wall(c(0, 0)).unwrap();
        assert!(matches!(
            m.place(AgentId(1), c(0, 0)),
            Err(SpaceError::CellIsWall { .. })
        ));
        m.place(AgentId(1), c(1, 1)).unwrap();
        assert!(matches!(
            m.place(AgentId(1), c(2, 2)),
            Err(SpaceError::DuplicateAgent { .. })
        ));
        assert!(matches!(
            m.place(AgentId(2), c(1, 1)),
            Err(SpaceError::CellOccupied { .. })
        ));
    }

    #[test]
    fn apply_move_updates_both_indexes() {
        let mut m = GridMap::new(3, 3).unwrap();
        m.place(AgentId(7), c(0, 0)).unwrap();
        let to = m.apply_move(AgentId(7), Direction::NorthEast).unwrap();
        assert_eq!(to, c(1, 1));
        assert_eq!(m.position_of(AgentId(7)), Some(c(1, 1)));
        assert_eq!(m.occupant_at(c(1, 1)), Some(AgentId(7)));
        assert_eq!(m.occupant_at(c(0, 0)), None);
    }

    #[test]
    fn blocked_move_leaves_map_unchanged() {
        let mut m = GridMap::new(3, 3).unwrap();
        m.place(AgentId(1), c(0, 0)).unwrap();
        assert!(matches!(
            m.apply_move(AgentId(1), Direction::South),
            Err(SpaceError::Grid(GridError::CellOutOfBounds { .. }))
        ));
        assert_eq!(m.position_of(AgentId(1)), Some(c(0, 0)));
        assert_eq!(m.apply_move(AgentId(1), Direction::Center), Ok(c(0, 0)));
    }

    #[test]
    fn remove_frees_the_cell() {
        let mut m = GridMap::new(3, 3).unwrap();
        m.place(AgentId(1), c(2, 2)).unwrap();
        assert_eq!(m.remove(AgentId(1)), Ok(c(2, 2)));
        assert_eq!(m.occupant_at(c(2, 2)), None);
        assert!(matches!(
            m.remove(AgentId(1)),
            Err(SpaceError::UnknownAgent { .. })
        ));
    }

    #[test]
    fn corner_has_three_neighbours() {
        let m = GridMap::new(5, 5).unwrap();
        assert_eq!(m.neighbours(c(0, 0)).as_slice(), &[c(0, 1), c(1, 1), c(1, 0)]);
        assert_eq!(m.neighbours(c(2, 2)).len(), 8);
    }

    #[test]
    fn agents_iterate_in_placement_order() {
        let mut m = GridMap::new(4, 1).unwrap();
        m.place(AgentId(9), c(3, 0)).unwrap();
        m.place(AgentId(2), c(0, 0)).unwrap();
        let ids: Vec<AgentId> = m.agents().map(|(a, _)| a).collect();
        assert_eq!(ids, vec![AgentId(9), AgentId(2)]);
    }
}
