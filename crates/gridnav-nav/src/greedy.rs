//! Greedy best-first waypoint search over remembered obstacles.
//!
//! [`plan`] returns a lazy [`GreedyPlan`]: each call to `next` looks at the
//! eight neighbours of the current waypoint in enumeration order and
//! steps to the one closest (Chebyshev) to the goal, never revisiting a
//! cell and never moving farther away. The plan only knows what the
//! caller tells it, so it is a heuristic, not a shortest path.

use gridnav_core::{Bounds, Cell};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A set of cells the planner must avoid.
pub trait CellSet {
    /// `true` if `cell` is in the set.
    fn contains_cell(&self, cell: Cell) -> bool;
}

impl<S: BuildHasher> CellSet for HashSet<Cell, S> {
    fn contains_cell(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl<S: BuildHasher> CellSet for IndexSet<Cell, S> {
    fn contains_cell(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl CellSet for BTreeSet<Cell> {
    fn contains_cell(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl CellSet for [Cell] {
    fn contains_cell(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl CellSet for Vec<Cell> {
    fn contains_cell(&self, cell: Cell) -> bool {
        self.as_slice().contains(&cell)
    }
}

/// How far a [`GreedyPlan`] has got.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanStatus {
    /// More waypoints may follow.
    Running,
    /// The goal was reached.
    Complete,
    /// No admissible neighbour, or the waypoint budget ran out.
    Truncated,
}

/// Default waypoint budget for [`plan`].
pub const DEFAULT_MAX_WAYPOINTS: usize = 64;

/// Lazy, finite, restartable greedy route from `start` toward `goal`.
#[derive(Debug)]
pub struct GreedyPlan<'a, W: ?Sized, O: ?Sized> {
    start: Cell,
    goal: Cell,
    walls: &'a W,
    occupied: &'a O,
    bounds: Bounds,
    max_waypoints: usize,
    path: IndexSet<Cell>,
    current: Cell,
    status: PlanStatus,
}

impl<W: ?Sized, O: ?Sized> Clone for GreedyPlan<'_, W, O> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            ..*self
        }
    }
}

/// Plan a greedy route from `start` to `goal`, avoiding `known_walls`,
/// `known_occupied` and everything outside `bounds`.
pub fn plan<'a, W, O>(
    start: Cell,
    goal: Cell,
    known_walls: &'a W,
    known_occupied: &'a O,
    bounds: Bounds,
) -> GreedyPlan<'a, W, O>
where
    W: CellSet + ?Sized,
    O: CellSet + ?Sized,
{
    let mut path = IndexSet::new();
    path.insert(start);
    GreedyPlan {
        start,
        goal,
        walls: known_walls,
        occupied: known_occupied,
        bounds,
        max_waypoints: DEFAULT_MAX_WAYPOINTS,
        path,
        current: start,
        status: PlanStatus::Running,
    }
}

impl<'a, W, O> GreedyPlan<'a, W, O>
where
    W: CellSet + ?Sized,
    O: CellSet + ?Sized,
{
    /// Cap the number of waypoints yielded.
    pub fn with_max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.max_waypoints = max_waypoints;
        self
    }

    /// Rewind to `start`.
    pub fn restart(&mut self) {
        self.path.clear();
        self.path.insert(self.start);
        self.current = self.start;
        self.status = PlanStatus::Running;
    }

    /// Progress so far.
    pub fn status(&self) -> PlanStatus {
        if self.status == PlanStatus::Running && self.current == self.goal {
            PlanStatus::Complete
        } else {
            self.status
        }
    }

    /// `true` once the goal has been yielded (or `start == goal`).
    pub fn is_complete(&self) -> bool {
        self.status() == PlanStatus::Complete
    }

    /// Most recent waypoint (the start before the first `next`).
    pub fn current(&self) -> Cell {
        self.current
    }

    fn admissible(&self, cell: Cell) -> bool {
        self.bounds.contains(cell)
            && !self.walls.contains_cell(cell)
            && !self.occupied.contains_cell(cell)
            && !self.path.contains(&cell)
    }
}

impl<W, O> Iterator for GreedyPlan<'_, W, O>
where
    W: CellSet + ?Sized,
    O: CellSet + ?Sized,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.status != PlanStatus::Running {
            return None;
        }
        if self.current == self.goal {
            self.status = PlanStatus::Complete;
            return None;
        }
        if self.path.len() > self.max_waypoints {
            self.status = PlanStatus::Truncated;
            return None;
        }
        let here = self.current.chebyshev(self.goal);
        let mut best: Option<(Cell, u32)> = None;
        for n in self.current.neighbours() {
            if !self.admissible(n) {
                continue;
            }
            let h = n.chebyshev(self.goal);
            if h <= here && best.is_none_or(|(_, b)| h < b) {
                best = Some((n, h));
            }
        }
        match best {
            Some((n, _)) => {
                self.path.insert(n);
                self.current = n;
                if n == self.goal {
                    self.status = PlanStatus::Complete;
                }
                Some(n)
            }
            None => {
                self.status = PlanStatus::Truncated;
                None
            }
        }
    }
}
