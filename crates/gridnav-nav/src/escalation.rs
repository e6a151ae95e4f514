//! Stuck detection and interim sub-target projection.

use crate::stepper::step_toward;
use gridnav_core::{Cell, GridOracle, Tick};

/// Counts direct-mode ticks that fail to get closer to the target.
///
/// The counter saturates at the threshold; [`observe`](Self::observe)
/// reports `true` on the tick it gets there.
#[derive(Clone, Debug)]
pub struct StuckMonitor {
    threshold: u32,
    counter: u32,
    best_distance: Option<u64>,
}

impl StuckMonitor {
    /// A fresh monitor that fires after `threshold` non-improving ticks.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            counter: 0,
            best_distance: None,
        }
    }

    /// Feed one direct tick's distance to the target. Returns `true` when
    /// the counter reaches the threshold.
    pub fn observe(&mut self, distance: u64) -> bool {
        match self.best_distance {
            Some(best) if distance >= best => {
                self.counter = self.counter.saturating_add(1).min(self.threshold);
                self.counter >= self.threshold
            }
            _ => {
                self.best_distance = Some(distance);
                self.counter = 0;
                false
            }
        }
    }

    /// Consecutive non-improving ticks so far.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Smallest distance seen since the last reset.
    pub fn best_distance(&self) -> Option<u64> {
        self.best_distance
    }

    /// Forget all history.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.best_distance = None;
    }
}

/// An interim sub-target being pursued after getting stuck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Escalation {
    /// Where the agent is headed instead of the real target.
    pub subtarget: Cell,
    /// Tick on which escalation began.
    pub started: Tick,
}

/// Probe up to `distance` cells from `current` toward `target` for the
/// first sensed, on-map, non-wall cell; fall back to `target`.
///
/// Probing stops at the first unsensed or off-map cell. Occupied cells
/// are acceptable sub-targets since occupants move.
pub fn project_subtarget<O: GridOracle + ?Sized>(
    oracle: &O,
    current: Cell,
    target: Cell,
    distance: u32,
) -> Cell {
    let dir = step_toward(current, target);
    let mut cell = current;
    for _ in 0..distance {
        cell = cell.add(dir);
        if cell == target {
            return target;
        }
        match oracle.observe(cell) {
            Some(o) if o.on_map && o.passable => return cell,
            Some(o) if o.on_map => continue,
            _ => break,
        }
    }
    target
}
