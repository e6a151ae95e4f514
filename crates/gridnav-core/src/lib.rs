//! Core types and traits for the gridnav navigation workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the grid coordinate and compass types every other crate speaks in,
//! the [`GridOracle`] trait through which the navigation core senses
//! the world, and the bounds/error types shared by grid backends.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod direction;
pub mod error;
pub mod id;
pub mod oracle;

pub use cell::{Bounds, Cell};
pub use direction::Direction;
pub use error::GridError;
pub use id::{AgentId, Tick};
pub use oracle::{CellObservation, GridOracle};
