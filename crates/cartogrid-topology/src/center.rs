//! Center finder: the deterministic starting region for a layout.

use cartogrid_core::{RegionIx, TopologyError, Vec2};

use crate::topology::Topology;

/// Unweighted arithmetic mean of all region centroids.
///
/// Returns `None` for an empty topology.
pub fn centroid_mean(topology: &Topology) -> Option<Vec2> {
    if topology.is_empty() {
        return None;
    }
    let sum = topology
        .iter()
        .fold(Vec2::ZERO, |acc, (_, region)| acc + region.centroid);
    let n = topology.len() as f64;
    Some(Vec2::new(sum.x / n, sum.y / n))
}

/// The region whose centroid is closest to [`centroid_mean`].
///
/// Ties go to the region that appears first in the topology.
///
/// # Errors
///
/// [`TopologyError::EmptyTopology`] if there are no regions.
pub fn find_center(topology: &Topology) -> Result<RegionIx, TopologyError> {
    let mean = centroid_mean(topology).ok_or(TopologyError::EmptyTopology)?;
    let mut best: Option<(RegionIx, f64)> = None;
    for (ix, region) in topology.iter() {
        let d = region.centroid.distance(mean);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((ix, d));
        }
    }
    best.map(|(ix, _)| ix).ok_or(TopologyError::EmptyTopology)
}
