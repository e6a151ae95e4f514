//! Periodic greedy route planning over [`ObstacleMemory`].

use crate::config::GreedyConfig;
use crate::greedy::plan;
use crate::memory::ObstacleMemory;
use gridnav_core::{Cell, Direction, GridOracle, Tick};
use tracing::trace;

/// Holds the current greedy route and decides when to recompute it.
///
/// Only routes that reach the goal are followed; a truncated plan makes
/// [`next_step`](Self::next_step) return `None` so the caller can fall
/// back to bug navigation.
#[derive(Clone, Debug)]
pub struct RoutePlanner {
    config: GreedyConfig,
    route: Vec<Cell>,
    goal: Option<Cell>,
    planned_at: Option<Tick>,
    complete: bool,
}

impl RoutePlanner {
    /// A planner with no route.
    pub fn new(config: GreedyConfig) -> Self {
        Self {
            config,
            route: Vec::new(),
            goal: None,
            planned_at: None,
            complete: false,
        }
    }

    /// The current route, starting with the cell it was planned from.
    pub fn route(&self) -> &[Cell] {
        &self.route
    }

    /// `true` if the current route reaches its goal.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Drop the route; the next call replans.
    pub fn invalidate(&mut self) {
        self.route.clear();
        self.goal = None;
        self.planned_at = None;
        self.complete = false;
    }

    fn replan<O: GridOracle + ?Sized>(
        &mut self,
        oracle: &O,
        memory: &ObstacleMemory,
        current: Cell,
        goal: Cell,
        tick: Tick,
    ) {
        let mut waypoints = plan(current, goal, memory.walls(), memory.occupied(), oracle.bounds())
            .with_max_waypoints(self.config.max_waypoints);
        self.route.clear();
        self.route.push(current);
        self.route.extend(waypoints.by_ref());
        self.complete = waypoints.is_complete();
        self.goal = Some(goal);
        self.planned_at = Some(tick);
        trace!(%current, %goal, len = self.route.len() - 1, complete = self.complete, "replanned");
    }

    fn due(&self, current: Cell, goal: Cell, tick: Tick) -> bool {
        match self.planned_at {
            None => true,
            Some(at) => {
                self.goal != Some(goal)
                    || tick.since(at) >= u64::from(self.config.replan_interval)
                    || !self.route.contains(&current)
            }
        }
    }

    /// The next move along a complete route to `goal`, replanning first
    /// when the interval has elapsed, the goal changed, or the agent left
    /// the route.
    ///
    /// `None` when the route is truncated or its next cell is not
    /// enterable this tick.
    pub fn next_step<O: GridOracle + ?Sized>(
        &mut self,
        oracle: &O,
        memory: &ObstacleMemory,
        current: Cell,
        goal: Cell,
        tick: Tick,
    ) -> Option<Direction> {
        if self.due(current, goal, tick) {
            self.replan(oracle, memory, current, goal, tick);
        }
        if !self.complete {
            return None;
        }
        let at = self.route.iter().position(|c| *c == current)?;
        let next = *self.route.get(at + 1)?;
        if !oracle.is_free(next) {
            trace!(%current, %next, "route blocked");
            self.invalidate();
            return None;
        }
        Direction::from_offset(next.x - current.x, next.y - current.y)
    }
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self::new(GreedyConfig::default())
    }
}
