//! Navigator configuration, validation, and error types.
//!
//! [`NavConfig`] is the constructor input for a
//! [`Navigator`](crate::Navigator). [`validate()`](NavConfig::validate)
//! checks every tunable up front so that navigation itself is total.

use std::error::Error;
use std::fmt;

use crate::ring::VisitedRing;

// ── StopPolicy ─────────────────────────────────────────────────────

/// When a perimeter trace hands control back to direct stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StopPolicy {
    /// Distance to the target is strictly below the distance at which
    /// tracing began.
    DistanceOnly,
    /// Strictly closer than at trace start AND on (or just across) the
    /// m-line from the trace origin to the target. Bug2.
    #[default]
    LineAndDistance,
    /// Back at the closest cell seen while tracing, after at least one
    /// trace step. Bug1.
    ClosestPoint,
    /// Inside the rectangle spanned by the trace origin and the target,
    /// after at least one trace step.
    BoundingBox,
}

// ── Planner ────────────────────────────────────────────────────────

/// Which planner drives ticks that start in direct mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Planner {
    /// Bug navigation only.
    #[default]
    Bug,
    /// Follow a greedy route over remembered obstacles while one is
    /// complete, falling back to bug navigation otherwise.
    GreedyFirst,
}

// ── TimeoutMove ────────────────────────────────────────────────────

/// What the navigator does on the tick an escalation times out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeoutMove {
    /// One random move that avoids the visited ring.
    #[default]
    RandomWalk,
    /// Start a fresh escalation toward a random far map corner.
    FarCorner,
}

// ── EscalationConfig ───────────────────────────────────────────────

/// Stuck detection and sub-target projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscalationConfig {
    /// Consecutive non-improving direct ticks before escalating. Default: 5.
    pub stuck_threshold: u32,
    /// How far past the obstacle to probe for a sub-target. Default: 3.
    pub projection_distance: u32,
    /// Ticks allowed to reach the sub-target before giving up. Default: 24.
    pub timeout_ticks: u32,
    /// Move made when the sub-target is not reached in time.
    /// Default: [`TimeoutMove::RandomWalk`].
    pub on_timeout: TimeoutMove,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            stuck_threshold: 5,
            projection_distance: 3,
            timeout_ticks: 24,
            on_timeout: TimeoutMove::RandomWalk,
        }
    }
}

// ── GreedyConfig ───────────────────────────────────────────────────

/// Obstacle memory and greedy route planning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GreedyConfig {
    /// Chebyshev radius of the square swept into obstacle memory each
    /// tick (only sensed cells are recorded). Default: 4.
    pub sense_radius: u32,
    /// Ticks between route recomputations. Default: 4.
    pub replan_interval: u32,
    /// Waypoint budget per plan. Default: 32.
    pub max_waypoints: usize,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            sense_radius: 4,
            replan_interval: 4,
            max_waypoints: 32,
        }
    }
}

// ── NavConfig ──────────────────────────────────────────────────────

/// Everything a [`Navigator`](crate::Navigator) can be tuned with.
#[derive(Clone, Debug, PartialEq)]
pub struct NavConfig {
    /// Trace stopping condition. Default: [`StopPolicy::LineAndDistance`].
    pub stop_policy: StopPolicy,
    /// Planner for direct ticks. Default: [`Planner::Bug`].
    pub planner: Planner,
    /// Visited-ring length, 8 to 16. Default: 16.
    pub visited_capacity: usize,
    /// Try the two directions adjacent to the straight one before tracing.
    /// Default: true.
    pub direct_fallback: bool,
    /// Trace steps before a trace is abandoned. `None` uses twice the map
    /// half-perimeter, `2 * (width + height)`. Default: `None`.
    pub max_trace_steps: Option<u32>,
    /// Chance of waiting a tick instead of tracing when the straight move
    /// is blocked only by another agent. Default: 0.0.
    pub occupant_wait_probability: f64,
    /// Stuck escalation.
    pub escalation: EscalationConfig,
    /// Greedy planning (used with [`Planner::GreedyFirst`]).
    pub greedy: GreedyConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            stop_policy: StopPolicy::default(),
            planner: Planner::default(),
            visited_capacity: VisitedRing::MAX_CAPACITY,
            direct_fallback: true,
            max_trace_steps: None,
            occupant_wait_probability: 0.0,
            escalation: EscalationConfig::default(),
            greedy: GreedyConfig::default(),
        }
    }
}

impl NavConfig {
    /// Check every tunable, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(VisitedRing::MIN_CAPACITY..=VisitedRing::MAX_CAPACITY)
            .contains(&self.visited_capacity)
        {
            return Err(ConfigError::VisitedCapacity {
                configured: self.visited_capacity,
            });
        }
        if self.max_trace_steps == Some(0) {
            return Err(ConfigError::Zero {
                name: "max_trace_steps",
            });
        }
        let p = self.occupant_wait_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability { value: p });
        }
        let zeros = [
            ("escalation.stuck_threshold", self.escalation.stuck_threshold == 0),
            ("escalation.projection_distance", self.escalation.projection_distance == 0),
            ("escalation.timeout_ticks", self.escalation.timeout_ticks == 0),
            ("greedy.replan_interval", self.greedy.replan_interval == 0),
            ("greedy.max_waypoints", self.greedy.max_waypoints == 0),
        ];
        if let Some((name, _)) = zeros.into_iter().find(|(_, zero)| *zero) {
            return Err(ConfigError::Zero { name });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`NavConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Visited-ring capacity outside 8..=16.
    VisitedCapacity {
        /// The configured capacity.
        configured: usize,
    },
    /// A count that must be positive is zero.
    Zero {
        /// Dotted name of the field.
        name: &'static str,
    },
    /// `occupant_wait_probability` is NaN or outside `[0, 1]`.
    InvalidProbability {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VisitedCapacity { configured } => write!(
                f,
                "visited_capacity {configured} outside {}..={}",
                VisitedRing::MIN_CAPACITY,
                VisitedRing::MAX_CAPACITY
            ),
            Self::Zero { name } => write!(f, "{name} must be at least 1"),
            Self::InvalidProbability { value } => {
                write!(f, "occupant_wait_probability {value} is not in [0, 1]")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(NavConfig::default().validate(), Ok(()));
    }

    #[test]
    fn documented_defaults() {
        let c = NavConfig::default();
        assert_eq!(c.stop_policy, StopPolicy::LineAndDistance);
        assert_eq!(c.planner, Planner::Bug);
        assert_eq!(c.visited_capacity, 16);
        assert!(c.direct_fallback);
        assert_eq!(c.escalation.stuck_threshold, 5);
        assert_eq!(c.escalation.projection_distance, 3);
        assert_eq!(c.escalation.timeout_ticks, 24);
        assert_eq!(c.escalation.on_timeout, TimeoutMove::RandomWalk);
        assert_eq!(c.occupant_wait_probability, 0.0);
    }

    #[test]
    fn visited_capacity_out_of_range() {
        for configured in [0, 7, 17] {
            let c = NavConfig {
                visited_capacity: configured,
                ..NavConfig::default()
            };
            match c.validate() {
                Err(ConfigError::VisitedCapacity { configured: got }) => {
                    assert_eq!(got, configured)
                }
                other => panic!("expected VisitedCapacity, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_threshold_is_named() {
        let mut c = NavConfig::default();
        c.escalation.stuck_threshold = 0;
        assert_eq!(
            c.validate(),
            Err(ConfigError::Zero {
                name: "escalation.stuck_threshold"
            })
        );
    }

    #[test]
    fn zero_trace_budget_rejected() {
        let c = NavConfig {
            max_trace_steps: Some(0),
            ..NavConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Zero { .. })));
    }

    #[test]
    fn probability_must_be_in_unit_interval() {
        for value in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let c = NavConfig {
                occupant_wait_probability: value,
                ..NavConfig::default()
            };
            assert!(
                matches!(c.validate(), Err(ConfigError::InvalidProbability { .. })),
                "{value} accepted"
            );
        }
    }

    #[test]
    fn error_display_names_field() {
        let msg = ConfigError::Zero {
            name: "greedy.max_waypoints",
        }
        .to_string();
        assert!(msg.contains("greedy.max_waypoints"));
    }
}
