//! Error types for topology construction and lookup.

use thiserror::Error;

use crate::id::{RegionId, RegionIx};

/// Errors arising from building or querying a region topology.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// No regions were supplied; no layout is possible.
    #[error("topology has no regions")]
    EmptyTopology,
    /// A region lists a neighbour that is not among the known regions.
    #[error("region {region} lists unknown neighbour {neighbor}")]
    UnknownNeighborReference {
        /// The region whose neighbour list holds the dangling id.
        region: RegionId,
        /// The id that matched no region.
        neighbor: RegionId,
    },
    /// Two input records share an id.
    #[error("region {region} appears more than once")]
    DuplicateRegion {
        /// The repeated id.
        region: RegionId,
    },
    /// A centroid coordinate is NaN or infinite.
    #[error("region {region} has a non-finite centroid")]
    NonFiniteCentroid {
        /// The offending region.
        region: RegionId,
    },
    /// A region index does not belong to the topology.
    #[error("region index {index} out of range for {len} regions")]
    RegionIndexOutOfRange {
        /// The offending index.
        index: RegionIx,
        /// Number of regions in the topology.
        len: usize,
    },
    /// A lookup named a region that does not exist.
    #[error("unknown region {region}")]
    UnknownRegion {
        /// The id that matched no region.
        region: RegionId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_regions() {
        let err = TopologyError::UnknownNeighborReference {
            region: RegionId::from("01001020100"),
            neighbor: RegionId::from("99999999999"),
        };
        let msg = err.to_string();
        assert!(msg.contains("01001020100"));
        assert!(msg.contains("99999999999"));
        assert_eq!(TopologyError::EmptyTopology.to_string(), "topology has no regions");
        let err = TopologyError::RegionIndexOutOfRange {
            index: RegionIx(7),
            len: 3,
        };
        assert_eq!(err.to_string(), "region index 7 out of range for 3 regions");
    }
}
