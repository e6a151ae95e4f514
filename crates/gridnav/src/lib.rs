//! gridnav: local-visibility navigation for grid-world game agents.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all gridnav sub-crates. For most users, adding `gridnav` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gridnav::prelude::*;
//!
//! // A 10×10 map with a wall the agent has to walk around.
//! let mut map = GridMap::new(10, 10).unwrap();
//! map.set_walls((0..8).map(|y| Cell::new(4, y))).unwrap();
//! let agent = AgentId(1);
//! map.place(agent, Cell::new(1, 1)).unwrap();
//!
//! let target = Cell::new(8, 1);
//! let mut nav = Navigator::seeded(NavConfig::default(), 7).unwrap();
//! for _ in 0..100 {
//!     let here = map.position_of(agent).unwrap();
//!     let view = SensingView::for_agent(&map, agent, 20).unwrap();
//!     match nav.navigate(&view, here, target) {
//!         Some(dir) => {
//!             map.apply_move(agent, dir).unwrap();
//!         }
//!         None if here == target => break,
//!         None => {}
//!     }
//! }
//! assert_eq!(map.position_of(agent), Some(target));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridnav-core` | Cells, bounds, directions, IDs, the oracle trait |
//! | [`space`] | `gridnav-space` | In-memory grid maps, sensing views, ASCII maps |
//! | [`nav`] | `gridnav-nav` | Bug navigation, escalation, greedy search |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`gridnav-core`).
///
/// Contains [`types::Cell`], [`types::Direction`] and the
/// [`types::GridOracle`] trait through which navigation senses the world.
pub use gridnav_core as types;

/// In-memory grid world (`gridnav-space`).
///
/// [`space::GridMap`] holds walls and agents; [`space::SensingView`] is
/// the radius-limited oracle over it.
pub use gridnav_space as space;

/// Navigation (`gridnav-nav`).
///
/// [`nav::Navigator`] is the per-agent entry point; the building blocks
/// ([`nav::BugNavigator`], [`nav::plan`], [`nav::StuckMonitor`], ...)
/// are usable on their own.
pub use gridnav_nav as nav;

/// Common imports for typical gridnav usage.
///
/// ```rust
/// use gridnav::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use gridnav_core::{AgentId, Bounds, Cell, CellObservation, Direction, GridOracle, Tick};

    // Errors
    pub use gridnav_core::GridError;
    pub use gridnav_nav::ConfigError;
    pub use gridnav_space::SpaceError;

    // Space
    pub use gridnav_space::{AsciiMap, GridMap, SensingView};

    // Navigation
    pub use gridnav_nav::{
        EscalationConfig, GreedyConfig, Mode, NavConfig, Navigator, Planner, StopPolicy,
        TimeoutMove,
    };
}
