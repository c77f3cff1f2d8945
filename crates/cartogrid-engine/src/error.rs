//! Errors that abort a layout run.

use cartogrid_core::{GridCoord, RegionId, TopologyError};
use thiserror::Error;

use crate::config::ConfigError;

/// Any error that aborts a layout run. Runs are never retried or resumed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The topology is empty or a lookup failed.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// The configuration is invalid.
    #[error("invalid layout configuration: {0}")]
    Config(#[from] ConfigError),
    /// Candidate-cell search exhausted every precision, including the
    /// catch-all 0, without producing a cell.
    #[error("internal invariant violated: no candidate cell for region {region} with {placed} regions placed")]
    InternalInvariantViolation {
        /// The region that could not be placed.
        region: RegionId,
        /// How many regions were already on the grid.
        placed: usize,
    },
    /// A region was offered for placement twice.
    #[error("region {region} is already placed")]
    AlreadyPlaced {
        /// The repeated region.
        region: RegionId,
    },
    /// A placement targeted an occupied cell.
    #[error("cell {coord} is already occupied")]
    CellOccupied {
        /// The occupied cell.
        coord: GridCoord,
    },
}
