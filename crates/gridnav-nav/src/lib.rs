//! Local-visibility grid navigation.
//!
//! The navigation core for agents that sense only a small radius around
//! themselves and may make one move per tick. [`Navigator`] combines:
//!
//! - direct stepping toward the target with left/right fallback
//!   ([`stepper`]),
//! - bug-style perimeter tracing with a pluggable [`StopPolicy`]
//!   ([`bug`], [`trace`]),
//! - stuck detection with escalation to a projected sub-target
//!   ([`escalation`]),
//! - optional greedy best-first routing over remembered obstacles
//!   ([`greedy`], [`memory`], [`route`]),
//! - randomised unstuck moves ([`unstuck`]).
//!
//! Everything reads the world through [`GridOracle`](gridnav_core::GridOracle)
//! and only ever asks about cells the oracle can sense.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bug;
pub mod config;
pub mod escalation;
pub mod greedy;
pub mod memory;
pub mod navigator;
pub mod ring;
pub mod route;
pub mod stepper;
pub mod trace;
pub mod unstuck;

pub use bug::{BugNavigator, Mode};
pub use config::{
    ConfigError, EscalationConfig, GreedyConfig, NavConfig, Planner, StopPolicy, TimeoutMove,
};
pub use escalation::{project_subtarget, Escalation, StuckMonitor};
pub use greedy::{plan, CellSet, GreedyPlan, PlanStatus};
pub use memory::ObstacleMemory;
pub use navigator::Navigator;
pub use ring::VisitedRing;
pub use route::RoutePlanner;
pub use stepper::{direct_step, fallback_step, step_toward};
pub use trace::Trace;
pub use unstuck::{far_corner, random_walk};
