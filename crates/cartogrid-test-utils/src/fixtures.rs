//! Fixture topologies.
//!
//! - [`linear_chain`]: three collinear same-county regions A - B - C.
//! - [`isolated_region`]: the chain plus a neighbourless region in another state.
//! - [`tract_lattice`]: a rectangular lattice of tract-style ids split into
//!   counties and states, 4-connected.

use cartogrid_topology::{RegionOrigin, RegionRecord, Topology};

/// Ids of the [`linear_chain`] regions, west to east.
pub const CHAIN: [&str; 3] = ["01001000100", "01001000200", "01001000300"];

/// Id of the neighbourless region in [`isolated_region`].
pub const ISLAND: &str = "15001000100";

/// Shorthand record constructor.
pub fn record(id: &str, longitude: f64, latitude: f64, neighbors: &[&str]) -> RegionRecord {
    RegionRecord::new(id, longitude, latitude, neighbors.iter().copied())
}

/// A - B - C along the x axis at x = 0, 1, 2; A and C are not adjacent.
pub fn linear_chain() -> Topology {
    let [a, b, c] = CHAIN;
    Topology::from_records(vec![
        record(a, 0.0, 0.0, &[b]),
        record(b, 1.0, 0.0, &[a, c]),
        record(c, 2.0, 0.0, &[b]),
    ])
    .expect("chain fixture is valid")
}

/// [`linear_chain`] plus [`ISLAND`], which has no neighbours.
pub fn isolated_region() -> Topology {
    let [a, b, c] = CHAIN;
    Topology::from_records(vec![
        record(a, 0.0, 0.0, &[b]),
        record(b, 1.0, 0.0, &[a, c]),
        record(c, 2.0, 0.0, &[b]),
        record(ISLAND, 1.0, -5.0, &[]),
    ])
    .expect("island fixture is valid")
}

/// Tract-style id: 2-digit state, 3-digit county, 6-digit tract.
pub fn tract_id(state: u32, county: u32, tract: u32) -> String {
    format!("{state:02}{county:03}{tract:06}")
}

/// A `cols` x `rows` lattice of regions with 4-connected adjacency.
///
/// Column `c`, row `r` has centroid `(c, -r)` (row 0 northernmost).
/// Each `county_size` x `county_size` block is one county; each half of
/// the lattice (split by column) is one state.
pub fn tract_lattice(cols: u32, rows: u32, county_size: u32) -> Topology {
    let county_size = county_size.max(1);
    let id = |c: u32, r: u32| {
        let state = if c < cols.div_ceil(2) { 1 } else { 2 };
        let county = 1 + (r / county_size) * cols.div_ceil(county_size) + c / county_size;
        tract_id(state, county, r * cols + c)
    };

    let mut records = Vec::with_capacity((cols * rows) as usize);
    for r in 0..rows {
        for c in 0..cols {
            let mut neighbors = Vec::with_capacity(4);
            if r > 0 {
                neighbors.push(id(c, r - 1));
            }
            if c > 0 {
                neighbors.push(id(c - 1, r));
            }
            if c + 1 < cols {
                neighbors.push(id(c + 1, r));
            }
            if r + 1 < rows {
                neighbors.push(id(c, r + 1));
            }
            records.push(
                RegionRecord::new(id(c, r), f64::from(c), -f64::from(r), neighbors)
                    .with_origin(RegionOrigin::new("lattice", (r * cols + c) as usize)),
            );
        }
    }
    Topology::from_records(records).expect("lattice fixture is valid")
}
