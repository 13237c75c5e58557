//! Error types for grid construction, editing and configuration.
//!
//! Search failures are not errors: an unreachable target comes back as an
//! empty [`Path`](crate::pathfinding::Path) or `None`.

use thiserror::Error;

use crate::grid::{OccupantId, Position, TerrainType};

/// Result type alias using [`TacticsError`].
pub type Result<T> = std::result::Result<T, TacticsError>;

/// Why an occupant could not be placed on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyConflict {
    /// The position lies outside the grid.
    OutOfBounds,
    /// The tile's terrain cannot hold a unit.
    Terrain(TerrainType),
    /// Another occupant already stands on the tile.
    Occupied(OccupantId),
}

impl std::fmt::Display for OccupancyConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::Terrain(terrain) => write!(f, "terrain is {terrain:?}"),
            Self::Occupied(id) => write!(f, "already occupied by {id}"),
        }
    }
}

/// Top-level error type for the tactics core.
#[derive(Debug, Error)]
pub enum TacticsError {
    /// Grid construction or resize with a non-positive dimension.
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Occupant placement rejected; occupancy is unchanged.
    #[error("Cannot place {occupant} at {position}: {conflict}")]
    ImpossibleOccupancy {
        /// Occupant that was being placed.
        occupant: OccupantId,
        /// Target tile.
        position: Position,
        /// Reason for the rejection.
        conflict: OccupancyConflict,
    },

    /// Text layout could not be turned into a grid.
    #[error("Invalid layout at row {row}: {message}")]
    InvalidLayout {
        /// Zero-based row of the offending line.
        row: usize,
        /// Error message.
        message: String,
    },

    /// Configuration file parsing error.
    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    /// Configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
