//! End-to-end smoke tests through the facade.

use cartogrid::prelude::*;
use cartogrid_test_utils::{assert_layout_complete, tract_lattice};

#[test]
fn lattice_layout_through_prelude() {
    let topology = tract_lattice(12, 9, 3);
    let engine = LayoutEngine::new(&topology, LayoutConfig::default().with_seed(3)).unwrap();
    let layout = engine.run().unwrap();
    assert_layout_complete(&layout, &topology);

    let metrics = layout.metrics();
    assert_eq!(metrics.regions, 108);
    assert!(layout.fill_ratio() > 0.0 && layout.fill_ratio() <= 1.0);
    let rows: Vec<_> = layout.rows().collect();
    assert_eq!(rows.len() as u32, layout.bounds().unwrap().height());
}

#[test]
fn empty_topology_is_rejected() {
    let topology = Topology::from_records(Vec::new()).unwrap();
    let err = LayoutEngine::new(&topology, LayoutConfig::default()).unwrap_err();
    assert_eq!(err, LayoutError::Topology(TopologyError::EmptyTopology));
}

#[test]
fn custom_precisions_are_validated() {
    assert!(JurisdictionLevels::new(vec![2, 5, 0]).is_err());
    let levels = JurisdictionLevels::new(vec![5, 0]).unwrap();
    let topology = tract_lattice(3, 3, 3);
    let layout = LayoutEngine::new(&topology, LayoutConfig::default().with_precisions(levels))
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(layout.len(), 9);
}
