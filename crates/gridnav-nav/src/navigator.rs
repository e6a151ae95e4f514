//! The per-agent navigation entry point.
//!
//! A [`Navigator`] owns everything one agent remembers between ticks:
//! bug-navigation state, stuck history, any active escalation, the visited
//! ring, remembered obstacles and the greedy route. Each tick the caller
//! passes the world view, its position and its target, and gets back at
//! most one direction to move in. The navigator never moves the agent.

use crate::bug::{BugNavigator, Mode};
use crate::config::{ConfigError, NavConfig, Planner, TimeoutMove};
use crate::escalation::{project_subtarget, Escalation, StuckMonitor};
use crate::memory::ObstacleMemory;
use crate::ring::VisitedRing;
use crate::route::RoutePlanner;
use crate::unstuck::{far_corner, random_walk};
use gridnav_core::{Cell, Direction, GridOracle, Tick};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Local-visibility navigation for one agent.
///
/// Generic over its random source so that tests and replays can inject
/// a seeded one; the default is [`ChaCha8Rng`].
#[derive(Clone, Debug)]
pub struct Navigator<R = ChaCha8Rng> {
    config: NavConfig,
    bug: BugNavigator,
    stuck: StuckMonitor,
    escalation: Option<Escalation>,
    visited: VisitedRing,
    memory: ObstacleMemory,
    route: RoutePlanner,
    target: Option<Cell>,
    tick: Tick,
    rng: R,
}

impl Navigator<ChaCha8Rng> {
    /// A navigator with a [`ChaCha8Rng`] seeded from `seed`.
    pub fn seeded(config: NavConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// A navigator with seed 0.
    pub fn new(config: NavConfig) -> Result<Self, ConfigError> {
        Self::seeded(config, 0)
    }
}

impl<R: Rng> Navigator<R> {
    /// A navigator drawing randomness from `rng`.
    ///
    /// Returns the first problem found by [`NavConfig::validate`].
    pub fn with_rng(config: NavConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bug: BugNavigator::new(&config),
            stuck: StuckMonitor::new(config.escalation.stuck_threshold),
            escalation: None,
            visited: VisitedRing::new(config.visited_capacity),
            memory: ObstacleMemory::new(),
            route: RoutePlanner::new(config.greedy.clone()),
            target: None,
            tick: Tick::default(),
            rng,
            config,
        })
    }

    /// Decide this tick's move from `current` toward `target`.
    ///
    /// Returns `None` when already on the target (and resets), when no
    /// move is possible, or when waiting is the better choice. Never
    /// queries a cell the oracle cannot sense.
    pub fn navigate<O: GridOracle + ?Sized>(
        &mut self,
        oracle: &O,
        current: Cell,
        target: Cell,
    ) -> Option<Direction> {
        self.tick = self.tick.next();
        self.visited.push(current);

        if self.target != Some(target) {
            if let Some(old) = self.target {
                debug!(%old, new = %target, "target changed");
            }
            self.reset();
            self.target = Some(target);
        }

        if current == target {
            debug!(%current, tick = %self.tick, "arrived");
            self.reset();
            return None;
        }

        if self.config.planner == Planner::GreedyFirst {
            self.memory
                .observe_around(oracle, current, self.config.greedy.sense_radius, self.tick);
        }

        if let Some(esc) = self.escalation {
            if current == esc.subtarget {
                debug!(%current, "sub-target reached");
                self.end_escalation();
            } else if self.tick.since(esc.started) >= u64::from(self.config.escalation.timeout_ticks) {
                debug!(%current, subtarget = %esc.subtarget, "escalation timed out");
                self.end_escalation();
                return self.on_timeout(oracle, current);
            } else {
                return self
                    .bug
                    .step(oracle, current, esc.subtarget, &self.visited, &mut self.rng);
            }
        }

        if self.bug.mode() == Mode::Direct {
            if self.stuck.observe(current.distance_squared(target)) {
                let subtarget = project_subtarget(
                    oracle,
                    current,
                    target,
                    self.config.escalation.projection_distance,
                );
                debug!(%current, %target, %subtarget, "stuck; escalating");
                self.stuck.reset();
                self.bug.reset();
                self.route.invalidate();
                self.escalation = Some(Escalation {
                    subtarget,
                    started: self.tick,
                });
                return self
                    .bug
                    .step(oracle, current, subtarget, &self.visited, &mut self.rng);
            }
            if self.config.planner == Planner::GreedyFirst {
                if let Some(dir) =
                    self.route
                        .next_step(oracle, &self.memory, current, target, self.tick)
                {
                    trace!(%current, %dir, "greedy route");
                    return Some(dir);
                }
            }
        }

        self.bug
            .step(oracle, current, target, &self.visited, &mut self.rng)
    }

    fn end_escalation(&mut self) {
        self.escalation = None;
        self.bug.reset();
        self.stuck.reset();
    }

    fn on_timeout<O: GridOracle + ?Sized>(
        &mut self,
        oracle: &O,
        current: Cell,
    ) -> Option<Direction> {
        if self.config.escalation.on_timeout == TimeoutMove::FarCorner {
            let corner = far_corner(oracle.bounds(), current, &mut self.rng);
            if corner != current {
                debug!(%current, %corner, "heading for far corner");
                self.escalation = Some(Escalation {
                    subtarget: corner,
                    started: self.tick,
                });
                return self
                    .bug
                    .step(oracle, current, corner, &self.visited, &mut self.rng);
            }
        }
        let dir = random_walk(oracle, current, &self.visited, &mut self.rng);
        trace!(%current, ?dir, "random walk");
        dir
    }

    /// Back to direct mode with no trace, escalation, stuck history or
    /// route. The visited ring and remembered walls are kept.
    pub fn reset(&mut self) {
        self.bug.reset();
        self.stuck.reset();
        self.escalation = None;
        self.route.invalidate();
    }

    /// Direct or tracing.
    pub fn mode(&self) -> Mode {
        self.bug.mode()
    }

    /// Consecutive non-improving direct ticks.
    pub fn stuck_counter(&self) -> u32 {
        self.stuck.counter()
    }

    /// `true` while pursuing a projected sub-target.
    pub fn in_escalation(&self) -> bool {
        self.escalation.is_some()
    }

    /// The projected sub-target, if escalating.
    pub fn subtarget(&self) -> Option<Cell> {
        self.escalation.map(|e| e.subtarget)
    }

    /// Recently occupied cells.
    pub fn visited(&self) -> &VisitedRing {
        &self.visited
    }

    /// The last target requested.
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Heading the active trace will try first, if tracing.
    pub fn trace_direction(&self) -> Option<Direction> {
        self.bug.trace().map(|t| t.direction())
    }

    /// Number of `navigate` calls so far.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Walls and occupants remembered for greedy planning.
    pub fn memory(&self) -> &ObstacleMemory {
        &self.memory
    }

    /// Configuration in force.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}
