//! Error types for grid-world operations.

use gridnav_core::{AgentId, Cell, GridError};
use std::error::Error;
use std::fmt;

/// Errors arising from map construction, agent placement or movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Invalid bounds or an out-of-bounds cell.
    Grid(GridError),
    /// The cell is a wall.
    CellIsWall {
        /// The offending cell.
        cell: Cell,
    },
    /// Another agent already stands on the cell.
    CellOccupied {
        /// The offending cell.
        cell: Cell,
        /// The agent standing there.
        occupant: AgentId,
    },
    /// No agent with this id is on the map.
    UnknownAgent {
        /// The missing agent.
        agent: AgentId,
    },
    /// An agent with this id is already on the map.
    DuplicateAgent {
        /// The duplicated agent.
        agent: AgentId,
    },
    /// An ASCII map could not be parsed.
    Parse {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid error: {e}"),
            Self::CellIsWall { cell } => write!(f, "cell {cell} is a wall"),
            Self::CellOccupied { cell, occupant } => {
                write!(f, "cell {cell} is occupied by agent {occupant}")
            }
            Self::UnknownAgent { agent } => write!(f, "agent {agent} is not on the map"),
            Self::DuplicateAgent { agent } => write!(f, "agent {agent} is already on the map"),
            Self::Parse { line, reason } => write!(f, "map line {line}: {reason}"),
        }
    }
}

impl Error for SpaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SpaceError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
