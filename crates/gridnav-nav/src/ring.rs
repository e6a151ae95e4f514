//! Short history of cells an agent has recently stood on.

use gridnav_core::Cell;
use std::collections::VecDeque;

/// Bounded, ordered history of the agent's last occupied cells.
///
/// Consecutive duplicates (the agent waited a tick) are collapsed so that
/// idling does not flush older history. When full, pushing evicts the
/// oldest entry.
#[derive(Clone, Debug)]
pub struct VisitedRing {
    cells: VecDeque<Cell>,
    capacity: usize,
}

impl VisitedRing {
    /// Smallest allowed capacity.
    pub const MIN_CAPACITY: usize = 8;
    /// Largest allowed capacity.
    pub const MAX_CAPACITY: usize = 16;

    /// An empty ring; `capacity` is clamped to 8..=16.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(Self::MIN_CAPACITY, Self::MAX_CAPACITY);
        Self {
            cells: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record that the agent stands on `cell`.
    pub fn push(&mut self, cell: Cell) {
        if self.cells.back() == Some(&cell) {
            return;
        }
        if self.cells.len() == self.capacity {
            self.cells.pop_front();
        }
        self.cells.push_back(cell);
    }

    /// `true` if `cell` is in the history.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Most recently pushed cell.
    pub fn last(&self) -> Option<Cell> {
        self.cells.back().copied()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Number of cells held.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if nothing has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Maximum number of cells held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl Default for VisitedRing {
    fn default() -> Self {
        Self::new(Self::MAX_CAPACITY)
    }
}
