//! Lockstep multi-agent driver.
//!
//! Each [`step`](Driver::step) gives every agent one `navigate` call, in
//! insertion order, against a fresh [`SensingView`] and applies the move
//! immediately, so later agents see earlier agents' new positions.

use gridnav_core::{AgentId, Cell, Direction};
use gridnav_nav::{Mode, Navigator};
use gridnav_space::view::DEFAULT_RADIUS_SQUARED;
use gridnav_space::{GridMap, SensingView, SpaceError};
use indexmap::IndexMap;

/// What one agent did in one tick, with the navigator state around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub agent: AgentId,
    pub from: Cell,
    pub dir: Option<Direction>,
    /// `false` when the move was discarded by a stall.
    pub moved: bool,
    pub was_tracing: bool,
    pub was_escalating: bool,
    pub stale_before: u32,
    pub stale_after: u32,
    /// Escalation began during this call.
    pub escalated: bool,
    /// Sensing-radius violations recorded by this call's view.
    pub violations: u32,
}

/// Result of [`Driver::run_until_arrival`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Steps taken; equals the budget when not everyone arrived.
    pub ticks: u64,
    pub arrived: bool,
    pub violations: u32,
}

struct Walker {
    nav: Navigator,
    target: Cell,
    path: Vec<Cell>,
    stalled_for: u32,
}

/// Runs [`Navigator`]s over a [`GridMap`] in lockstep.
pub struct Driver {
    map: GridMap,
    radius_squared: u64,
    walkers: IndexMap<AgentId, Walker>,
    ticks: u64,
    violations: u32,
}

impl Driver {
    pub fn new(map: GridMap) -> Self {
        Self {
            map,
            radius_squared: DEFAULT_RADIUS_SQUARED,
            walkers: IndexMap::new(),
            ticks: 0,
            violations: 0,
        }
    }

    pub fn with_radius_squared(mut self, radius_squared: u64) -> Self {
        self.radius_squared = radius_squared;
        self
    }

    /// Place `agent` at `start` and have `nav` steer it to `target`.
    pub fn add_agent(
        &mut self,
        agent: AgentId,
        start: Cell,
        target: Cell,
        nav: Navigator,
    ) -> Result<(), SpaceError> {
        if self.walkers.contains_key(&agent) {
            return Err(SpaceError::DuplicateAgent { agent });
        }
        self.map.place(agent, start)?;
        self.walkers.insert(
            agent,
            Walker {
                nav,
                target,
                path: vec![start],
                stalled_for: 0,
            },
        );
        Ok(())
    }

    /// Place an agent that never moves.
    pub fn add_obstacle(&mut self, agent: AgentId, at: Cell) -> Result<(), SpaceError> {
        self.map.place(agent, at)
    }

    /// Discard `agent`'s moves for the next `ticks` steps, as a caller
    /// enforcing a movement cooldown would.
    pub fn stall(&mut self, agent: AgentId, ticks: u32) -> Result<(), SpaceError> {
        let walker = self
            .walkers
            .get_mut(&agent)
            .ok_or(SpaceError::UnknownAgent { agent })?;
        walker.stalled_for = ticks;
        Ok(())
    }

    pub fn retarget(&mut self, agent: AgentId, target: Cell) -> Result<(), SpaceError> {
        let walker = self
            .walkers
            .get_mut(&agent)
            .ok_or(SpaceError::UnknownAgent { agent })?;
        walker.target = target;
        Ok(())
    }

    /// One lockstep tick for every agent.
    pub fn step(&mut self) -> Result<Vec<Decision>, SpaceError> {
        self.ticks += 1;
        let mut decisions = Vec::with_capacity(self.walkers.len());
        for (&agent, walker) in self.walkers.iter_mut() {
            let from = self
                .map
                .position_of(agent)
                .ok_or(SpaceError::UnknownAgent { agent })?;
            let was_tracing = walker.nav.mode() == Mode::Tracing;
            let was_escalating = walker.nav.in_escalation();
            let stale_before = walker.nav.stuck_counter();

            let (dir, violations) = {
                let view = SensingView::for_agent(&self.map, agent, self.radius_squared)?;
                let dir = walker.nav.navigate(&view, from, walker.target);
                (dir, view.violations())
            };
            self.violations = self.violations.saturating_add(violations);

            let stalled = walker.stalled_for > 0;
            walker.stalled_for = walker.stalled_for.saturating_sub(1);
            let moved = match dir {
                Some(d) if !stalled => {
                    walker.path.push(self.map.apply_move(agent, d)?);
                    true
                }
                _ => false,
            };

            decisions.push(Decision {
                agent,
                from,
                dir,
                moved,
                was_tracing,
                was_escalating,
                stale_before,
                stale_after: walker.nav.stuck_counter(),
                escalated: !was_escalating && walker.nav.in_escalation(),
                violations,
            });
        }
        Ok(decisions)
    }

    /// `true` when every navigating agent stands on its target.
    pub fn all_arrived(&self) -> bool {
        self.walkers
            .iter()
            .all(|(agent, w)| self.map.position_of(*agent) == Some(w.target))
    }

    /// Step until everyone has arrived or `max_ticks` steps have run.
    pub fn run_until_arrival(&mut self, max_ticks: u64) -> Result<Outcome, SpaceError> {
        let mut ticks = 0;
        while ticks < max_ticks && !self.all_arrived() {
            self.step()?;
            ticks += 1;
        }
        Ok(Outcome {
            ticks,
            arrived: self.all_arrived(),
            violations: self.violations,
        })
    }

    /// Cells `agent` has stood on, starting with where it was placed.
    pub fn path(&self, agent: AgentId) -> Option<&[Cell]> {
        self.walkers.get(&agent).map(|w| w.path.as_slice())
    }

    pub fn navigator(&self, agent: AgentId) -> Option<&Navigator> {
        self.walkers.get(&agent).map(|w| &w.nav)
    }

    pub fn position(&self, agent: AgentId) -> Option<Cell> {
        self.map.position_of(agent)
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    /// Total steps run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sensing-radius violations across all views so far.
    pub fn violations(&self) -> u32 {
        self.violations
    }
}
