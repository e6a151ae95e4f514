//! Test utilities and scenario fixtures for gridnav development.
//!
//! Provides a [`MockOracle`] that answers from explicit cell sets and
//! logs every query, hand-drawn scenario maps in [`fixtures`], and a
//! lockstep multi-agent [`Driver`] that runs [`Navigator`]s against a
//! [`GridMap`](gridnav_space::GridMap) the way a game loop would.
//!
//! [`Navigator`]: gridnav_nav::Navigator

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod driver;
pub mod fixtures;

pub use driver::{Decision, Driver, Outcome};
pub use fixtures::Scenario;

use std::cell::RefCell;

use gridnav_core::{Bounds, Cell, GridOracle};
use indexmap::IndexSet;

/// Mock implementation of [`GridOracle`].
///
/// Walls and occupants are explicit sets; sensing is a squared-radius
/// disc around a movable centre. Every passability or occupancy query is
/// logged together with the centre in force when it was made, so tests
/// can check which cells the code under test looked at.
pub struct MockOracle {
    bounds: Bounds,
    walls: IndexSet<Cell>,
    occupied: IndexSet<Cell>,
    center: Cell,
    radius_squared: u64,
    queries: RefCell<Vec<(Cell, Cell)>>,
}

impl MockOracle {
    /// An empty map that senses everything within `radius_squared` of
    /// `center`.
    pub fn new(bounds: Bounds, center: Cell, radius_squared: u64) -> Self {
        Self {
            bounds,
            walls: IndexSet::new(),
            occupied: IndexSet::new(),
            center,
            radius_squared,
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Cell>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn with_occupied(mut self, occupied: impl IntoIterator<Item = Cell>) -> Self {
        self.occupied.extend(occupied);
        self
    }

    /// Move the sensing centre, e.g. after applying a move.
    pub fn recenter(&mut self, center: Cell) {
        self.center = center;
    }

    pub fn center(&self) -> Cell {
        self.center
    }

    /// Every cell queried for passability or occupancy, in order.
    pub fn queries(&self) -> Vec<Cell> {
        self.queries.borrow().iter().map(|&(_, cell)| cell).collect()
    }

    /// Logged queries for cells outside the sensing disc that was in
    /// force when each query was made.
    pub fn unsensed_queries(&self) -> Vec<Cell> {
        self.queries
            .borrow()
            .iter()
            .filter(|&&(center, cell)| cell.distance_squared(center) > self.radius_squared)
            .map(|&(_, cell)| cell)
            .collect()
    }

    pub fn clear_queries(&self) {
        self.queries.borrow_mut().clear();
    }
}

impl GridOracle for MockOracle {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn can_sense(&self, cell: Cell) -> bool {
        cell.distance_squared(self.center) <= self.radius_squared
    }

    fn is_passable(&self, cell: Cell) -> bool {
        self.queries.borrow_mut().push((self.center, cell));
        self.bounds.contains(cell) && !self.walls.contains(&cell)
    }

    fn is_occupied(&self, cell: Cell) -> bool {
        self.queries.borrow_mut().push((self.center, cell));
        self.occupied.contains(&cell)
    }
}
