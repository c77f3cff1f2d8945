//! Benchmark profiles for the cartogrid layout engine.
//!
//! - [`reference_topology`]: 100x100 tract lattice (10K regions), 10x10 counties
//! - [`stress_topology`]: 200x200 tract lattice (40K regions), 20x20 counties
//! - [`fragmented_topology`]: reference lattice cut into 4-row bands that
//!   the traversal can only cross by jumping
//! - [`reference_config`]: default precisions, seeded random start

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cartogrid_engine::{LayoutConfig, StartRegion};
use cartogrid_test_utils::tract_lattice;
use cartogrid_topology::{RegionRecord, Topology};

/// 100x100 lattice (10K regions) split into 100 counties and 2 states.
pub fn reference_topology() -> Topology {
    tract_lattice(100, 100, 10)
}

/// 200x200 lattice (40K regions) split into 100 counties and 2 states.
pub fn stress_topology() -> Topology {
    tract_lattice(200, 200, 20)
}

/// 100x100 lattice where rows `4k` and `4k - 1` are not adjacent.
///
/// Each 4-row band is its own component, so a traversal needs at least
/// 24 jumps.
pub fn fragmented_topology() -> Topology {
    let full = reference_topology();
    let band = |latitude: f64| (-latitude) as i64 / 4;
    let records: Vec<RegionRecord> = full
        .iter()
        .map(|(_, region)| {
            let own = band(region.centroid.y);
            let neighbors = region
                .neighbors
                .iter()
                .filter(|&&n| band(full.centroid(n).y) == own)
                .map(|&n| full.id(n).clone());
            RegionRecord::new(
                region.id.clone(),
                region.centroid.x,
                region.centroid.y,
                neighbors,
            )
        })
        .collect();
    Topology::from_records(records).expect("band filter only drops edges")
}

/// Default precisions with a seeded random start region.
pub fn reference_config(seed: u64) -> LayoutConfig {
    LayoutConfig::default()
        .with_seed(seed)
        .with_start(StartRegion::Random)
}
