//! Property tests over random topologies.
//!
//! Regions get tract-style ids spread over a few states and counties,
//! arbitrary centroids (including coincident ones), and arbitrary
//! one-sided edge lists that normalization makes symmetric.

use cartogrid_core::{GridCoord, RegionIx};
use cartogrid_engine::{
    layout_hash, DegenerateOrientation, JurisdictionLevels, LayoutConfig, LayoutEngine,
    StartRegion, Traversal,
};
use cartogrid_test_utils::{
    assert_grid_consistent, assert_layout_complete, assert_perimeter_exact, record, tract_id,
};
use cartogrid_topology::Topology;
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Sketch {
    regions: Vec<(u32, u32, i32, i32)>,
    edges: Vec<(usize, usize)>,
}

fn arb_sketch() -> impl Strategy<Value = Sketch> {
    (1usize..40).prop_flat_map(|n| {
        (
            prop::collection::vec((1u32..3, 1u32..4, -8i32..8, -8i32..8), n),
            prop::collection::vec((0..n, 0..n), 0..n * 3),
        )
            .prop_map(|(regions, edges)| Sketch { regions, edges })
    })
}

fn build(sketch: &Sketch) -> Topology {
    let ids: Vec<String> = sketch
        .regions
        .iter()
        .enumerate()
        .map(|(i, &(state, county, _, _))| tract_id(state, county, i as u32))
        .collect();
    let records = sketch
        .regions
        .iter()
        .enumerate()
        .map(|(i, &(_, _, x, y))| {
            let neighbors: Vec<&str> = sketch
                .edges
                .iter()
                .filter(|&&(a, _)| a == i)
                .map(|&(_, b)| ids[b].as_str())
                .collect();
            record(&ids[i], f64::from(x), f64::from(y), &neighbors)
        })
        .collect::<Vec<_>>();
    Topology::from_records(records).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn traversal_is_a_permutation(sketch in arb_sketch(), start in any::<prop::sample::Index>()) {
        let t = build(&sketch);
        let levels = JurisdictionLevels::default();
        let start = RegionIx(start.index(t.len()) as u32);
        let traversal = Traversal::new(&t, &levels, start).unwrap();
        prop_assert_eq!(traversal.len(), t.len());

        let order: Vec<RegionIx> = traversal.collect();
        prop_assert_eq!(order.len(), t.len());
        prop_assert_eq!(order[0], start);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), t.len());
    }

    #[test]
    fn every_step_keeps_grid_invariants(sketch in arb_sketch(), seed in any::<u64>()) {
        let t = build(&sketch);
        let config = LayoutConfig::default()
            .with_seed(seed)
            .with_start(StartRegion::Random);
        let engine = LayoutEngine::new(&t, config).unwrap();
        let mut run = engine.start().unwrap();

        let mut first = true;
        while let Some(placement) = run.step().unwrap() {
            if first {
                prop_assert_eq!(placement.coord, GridCoord::ORIGIN);
                first = false;
            }
            prop_assert!(placement.candidates >= 1);
            assert_perimeter_exact(run.state());
            assert_grid_consistent(run.state(), &t);
        }
        prop_assert_eq!(run.remaining(), 0);

        let layout = run.finish().unwrap();
        assert_layout_complete(&layout, &t);
        prop_assert_eq!(layout.metrics().regions, t.len());
    }

    #[test]
    fn layouts_are_reproducible(sketch in arb_sketch(), seed in any::<u64>(), exclude in any::<bool>()) {
        let t = build(&sketch);
        let policy = if exclude {
            DegenerateOrientation::Exclude
        } else {
            DegenerateOrientation::NeutralCost
        };
        let config = LayoutConfig::default()
            .with_seed(seed)
            .with_start(StartRegion::Random)
            .with_degenerate_orientation(policy);
        let a = LayoutEngine::new(&t, config.clone()).unwrap().run().unwrap();
        let b = LayoutEngine::new(&t, config).unwrap().run().unwrap();
        prop_assert_eq!(layout_hash(&a), layout_hash(&b));
        prop_assert_eq!(a.metrics().tie_breaks, b.metrics().tie_breaks);
    }
}
