//! DIRECT/TRACING state machine.

use crate::config::{NavConfig, StopPolicy};
use crate::ring::VisitedRing;
use crate::stepper::{blocked_by_occupant, direct_step, fallback_step, step_toward};
use crate::trace::Trace;
use gridnav_core::{Cell, Direction, GridOracle};
use rand::Rng;
use tracing::{debug, trace};

/// Which half of the bug state machine is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Heading straight for the target.
    #[default]
    Direct,
    /// Following an obstacle perimeter.
    Tracing,
}

/// Bug navigation toward one target at a time.
///
/// Alternates between direct stepping and perimeter tracing. Which bug
/// variant it behaves as is set by its [`StopPolicy`].
#[derive(Clone, Debug)]
pub struct BugNavigator {
    policy: StopPolicy,
    direct_fallback: bool,
    max_trace_steps: Option<u32>,
    occupant_wait_probability: f64,
    trace: Option<Trace>,
}

impl BugNavigator {
    /// A navigator in direct mode, tuned by `config`.
    pub fn new(config: &NavConfig) -> Self {
        Self {
            policy: config.stop_policy,
            direct_fallback: config.direct_fallback,
            max_trace_steps: config.max_trace_steps,
            occupant_wait_probability: config.occupant_wait_probability,
            trace: None,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        if self.trace.is_some() {
            Mode::Tracing
        } else {
            Mode::Direct
        }
    }

    /// The active trace, if tracing.
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Stop policy in force.
    pub fn policy(&self) -> StopPolicy {
        self.policy
    }

    /// Drop any trace and return to direct mode.
    pub fn reset(&mut self) {
        self.trace = None;
    }

    /// Decide this tick's move from `current` toward `target`.
    ///
    /// Returns `None` when standing on the target, when every neighbour
    /// is blocked, or when choosing to wait for another agent to clear
    /// the way.
    pub fn step<O, R>(
        &mut self,
        oracle: &O,
        current: Cell,
        target: Cell,
        visited: &VisitedRing,
        rng: &mut R,
    ) -> Option<Direction>
    where
        O: GridOracle + ?Sized,
        R: Rng + ?Sized,
    {
        if current == target {
            self.trace = None;
            return None;
        }

        if let Some(t) = self.trace.as_mut() {
            let limit = self.max_trace_steps.unwrap_or_else(|| {
                let b = oracle.bounds();
                b.width().saturating_add(b.height()).saturating_mul(2)
            });
            if t.target() != target {
                debug!(%current, old = %t.target(), new = %target, "trace target moved; back to direct");
                self.trace = None;
            } else if t.should_stop(self.policy, current) {
                debug!(%current, %target, steps = t.steps(), policy = ?self.policy, "trace complete");
                self.trace = None;
            } else if t.steps() > limit {
                debug!(%current, %target, steps = t.steps(), limit, "trace abandoned");
                self.trace = None;
            } else {
                t.record(current);
                let dir = t.advance(oracle, current);
                trace!(%current, ?dir, heading = %t.direction(), "tracing");
                return dir;
            }
        }

        if let Some(dir) = direct_step(oracle, current, target) {
            trace!(%current, %target, %dir, "direct");
            return Some(dir);
        }
        if self.direct_fallback {
            if let Some(dir) = fallback_step(oracle, current, target, visited) {
                trace!(%current, %target, %dir, "direct fallback");
                return Some(dir);
            }
        }

        let straight = step_toward(current, target);
        if self.occupant_wait_probability > 0.0
            && blocked_by_occupant(oracle, current, straight)
            && rng.random_bool(self.occupant_wait_probability)
        {
            trace!(%current, %straight, "waiting for occupant to move");
            return None;
        }

        let mut t = Trace::begin(current, target);
        debug!(%current, %target, heading = %t.direction(), "trace begin");
        t.record(current);
        let dir = t.advance(oracle, current);
        self.trace = Some(t);
        dir
    }
}

impl Default for BugNavigator {
    fn default() -> Self {
        Self::new(&NavConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::AgentId;
    use gridnav_space::{AsciiMap, GridMap, SensingView};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    /// Run the navigator for up to `ticks`, applying every move.
    fn drive(
        map: &mut GridMap,
        bug: &mut BugNavigator,
        target: Cell,
        ticks: usize,
    ) -> Vec<Cell> {
        let agent = AgentId(1);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut visited = VisitedRing::default();
        let mut path = Vec::new();
        for _ in 0..ticks {
            let here = map.position_of(agent).unwrap();
            visited.push(here);
            let view = SensingView::for_agent(map, agent, 20).unwrap();
            let dir = bug.step(&view, here, target, &visited, &mut rng);
            assert_eq!(view.violations(), 0);
            let Some(dir) = dir else { break };
            path.push(map.apply_move(agent, dir).unwrap());
        }
        path
    }

    #[test]
    fn open_field_stays_direct() {
        let mut map = GridMap::new(8, 8).unwrap();
        map.place(AgentId(1), c(0, 0)).unwrap();
        let mut bug = BugNavigator::default();
        let path = drive(&mut map, &mut bug, c(6, 3), 20);
        assert_eq!(path.len(), 6);
        assert_eq!(path.last(), Some(&c(6, 3)));
        assert_eq!(bug.mode(), Mode::Direct);
    }

    #[test]
    fn blocked_straight_move_enters_tracing_and_moves_same_tick() {
        let parsed = AsciiMap::parse("...\n.#.\n...\n###").unwrap();
        let view = SensingView::new(&parsed.map, c(1, 1), 20);
        let config = NavConfig {
            direct_fallback: false,
            ..NavConfig::default()
        };
        let mut bug = BugNavigator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let dir = bug.step(&view, c(1, 1), c(1, 3), &VisitedRing::default(), &mut rng);
        assert_eq!(bug.mode(), Mode::Tracing);
        // North blocked: first left turn is NW.
        assert_eq!(dir, Some(Direction::NorthWest));
        let t = bug.trace().unwrap();
        assert_eq!(t.origin(), c(1, 1));
        assert_eq!(t.start_distance(), 4);
        assert_eq!(t.direction(), Direction::NorthEast);
    }

    #[test]
    fn fallback_avoids_tracing_when_a_side_step_exists() {
        let parsed = AsciiMap::parse("...\n.#.\n...").unwrap();
        let view = SensingView::new(&parsed.map, c(1, 0), 20);
        let mut bug = BugNavigator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let dir = bug.step(&view, c(1, 0), c(1, 2), &VisitedRing::default(), &mut rng);
        assert_eq!(dir, Some(Direction::NorthWest));
        assert_eq!(bug.mode(), Mode::Direct);
    }

    #[test]
    fn enclosed_agent_returns_none_and_keeps_trace() {
        let parsed = AsciiMap::parse("###\n#.#\n###").unwrap();
        let view = SensingView::new(&parsed.map, c(1, 1), 20);
        let mut bug = BugNavigator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let visited = VisitedRing::default();
        for _ in 0..3 {
            assert_eq!(bug.step(&view, c(1, 1), c(1, 10), &visited, &mut rng), None);
        }
        let t = bug.trace().unwrap();
        assert_eq!(t.direction(), Direction::North);
        assert_eq!(t.steps(), 0);
        assert_eq!(view.violations(), 0);
    }

    #[test]
    fn standing_on_target_clears_trace() {
        let parsed = AsciiMap::parse("...\n.#.\n...").unwrap();
        let view = SensingView::new(&parsed.map, c(1, 0), 20);
        let mut bug = BugNavigator::new(&NavConfig {
            direct_fallback: false,
            ..NavConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let visited = VisitedRing::default();
        bug.step(&view, c(1, 0), c(1, 2), &visited, &mut rng);
        assert_eq!(bug.mode(), Mode::Tracing);
        assert_eq!(bug.step(&view, c(1, 2), c(1, 2), &visited, &mut rng), None);
        assert_eq!(bug.mode(), Mode::Direct);
    }

    #[test]
    fn certain_hesitation_waits_behind_occupant() {
        let mut map = GridMap::new(3, 1).unwrap();
        map.place(AgentId(2), c(1, 0)).unwrap();
        let view = SensingView::new(&map, c(0, 0), 20);
        let mut bug = BugNavigator::new(&NavConfig {
            occupant_wait_probability: 1.0,
            ..NavConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let dir = bug.step(&view, c(0, 0), c(2, 0), &VisitedRing::default(), &mut rng);
        assert_eq!(dir, None);
        assert_eq!(bug.mode(), Mode::Direct);
    }

    #[test]
    fn trace_budget_abandons_and_restarts_trace() {
        let parsed = AsciiMap::parse(
            r"
            ..........
            ....#.....
            ....#.....
            ....#.....
            ....#.....
            ....#.....
            ....#.....
            ....#.....
            ....#.....
            ",
        )
        .unwrap();
        let mut map = parsed.map;
        map.place(AgentId(1), c(3, 1)).unwrap();
        let mut bug = BugNavigator::new(&NavConfig {
            max_trace_steps: Some(2),
            direct_fallback: false,
            ..NavConfig::default()
        });
        let path = drive(&mut map, &mut bug, c(9, 1), 4);
        assert_eq!(path, vec![c(3, 2), c(3, 3), c(3, 4), c(3, 5)]);
        // The fourth tick exceeded the budget and began a fresh trace.
        let t = bug.trace().unwrap();
        assert_eq!(t.origin(), c(3, 4));
        assert_eq!(t.steps(), 1);
    }
}
