//! Error types for grid geometry.

use crate::cell::{Bounds, Cell};
use std::fmt;

/// Errors arising from bounds construction or coordinate checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct bounds with zero cells.
    EmptyBounds,
    /// The minimum corner exceeds the maximum corner on some axis.
    InvertedBounds {
        /// Requested south-west corner.
        min: Cell,
        /// Requested north-east corner.
        max: Cell,
    },
    /// An axis spans more cells than can be indexed.
    DimensionTooLarge {
        /// Which axis (`"width"` or `"height"`).
        name: &'static str,
        /// The requested extent.
        value: u64,
        /// The maximum allowed extent.
        max: u32,
    },
    /// A cell is outside the bounds of the map.
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// The map bounds.
        bounds: Bounds,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBounds => write!(f, "bounds must contain at least one cell"),
            Self::InvertedBounds { min, max } => {
                write!(f, "inverted bounds: min {min} exceeds max {max}")
            }
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum {max}")
            }
            Self::CellOutOfBounds { cell, bounds } => {
                write!(f, "cell {cell} out of bounds {bounds}")
            }
        }
    }
}

impl std::error::Error for GridError {}
