//! In-memory grid world for gridnav.
//!
//! Provides [`GridMap`], a bounded 8-connected map of walls and agents,
//! ASCII parsing for hand-drawn scenario maps, and [`SensingView`], the
//! radius-limited [`GridOracle`](gridnav_core::GridOracle) that lets the
//! navigation core run without a live game engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ascii;
pub mod error;
pub mod grid;
pub mod view;

pub use ascii::AsciiMap;
pub use error::SpaceError;
pub use grid::GridMap;
pub use view::SensingView;
