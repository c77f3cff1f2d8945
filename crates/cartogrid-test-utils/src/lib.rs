//! Test utilities for cartogrid development.
//!
//! Provides fixture topologies ([`fixtures`]) and assertions for the grid
//! invariants every layout must satisfy ([`assert_grid_consistent`],
//! [`assert_perimeter_exact`], [`assert_layout_complete`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashSet;

use cartogrid_core::{GridCoord, RegionIx};
use cartogrid_engine::{GridLayout, GridState};
use cartogrid_topology::Topology;

pub use fixtures::{isolated_region, linear_chain, record, tract_id, tract_lattice};

/// Recompute the perimeter from scratch: every free cell 8-adjacent to an
/// occupied one.
pub fn recompute_perimeter(state: &GridState) -> HashSet<GridCoord> {
    state
        .cells()
        .flat_map(|(c, _)| c.neighbours())
        .filter(|&n| !state.is_occupied(n))
        .collect()
}

/// Assert the incrementally maintained perimeter equals [`recompute_perimeter`].
pub fn assert_perimeter_exact(state: &GridState) {
    let expected = recompute_perimeter(state);
    let actual: HashSet<GridCoord> = state.perimeter().iter().copied().collect();
    assert_eq!(
        actual.len(),
        state.perimeter().len(),
        "perimeter holds duplicate cells"
    );
    assert_eq!(
        actual,
        expected,
        "perimeter diverged from recomputation after {} placements",
        state.len()
    );
}

/// Assert grid and placement index are mutual inverses with distinct cells.
pub fn assert_grid_consistent(state: &GridState, topology: &Topology) {
    let mut seen_cells = HashSet::new();
    let mut seen_regions = HashSet::new();
    for (coord, region) in state.cells() {
        assert!(seen_cells.insert(coord), "cell {coord} assigned twice");
        assert!(seen_regions.insert(region), "region {region} placed twice");
        assert_eq!(state.coord_of(region), Some(coord));
        assert!(!state.on_perimeter(coord), "occupied cell {coord} on perimeter");
    }
    let placed = topology
        .indices()
        .filter(|&ix: &RegionIx| state.is_placed(ix))
        .count();
    assert_eq!(placed, state.len(), "placement index and grid differ in size");
}

/// Assert a finished layout places every region of `topology` exactly once.
pub fn assert_layout_complete(layout: &GridLayout, topology: &Topology) {
    assert_eq!(layout.len(), topology.len());
    let mut cells = HashSet::new();
    for (coord, id) in layout.iter() {
        assert!(cells.insert(coord), "cell {coord} assigned twice");
        assert!(topology.get(id.as_str()).is_some(), "unknown region {id}");
        assert_eq!(layout.coord_of(id.as_str()), Some(coord));
        assert_eq!(layout.get(coord), Some(id));
        assert!(layout.bounds().is_some_and(|b| b.contains(coord)));
    }
    for (_, region) in topology.iter() {
        assert!(
            layout.coord_of(region.id.as_str()).is_some(),
            "region {} missing from layout",
            region.id
        );
    }
}
