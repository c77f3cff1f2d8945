//! Criterion benchmarks for topology construction, traversal, and layout.

use std::hint::black_box;

use cartogrid_bench::{fragmented_topology, reference_config, reference_topology, stress_topology};
use cartogrid_engine::{JurisdictionLevels, LayoutEngine, Traversal};
use cartogrid_test_utils::tract_lattice;
use cartogrid_topology::{find_center, RegionRecord, Topology};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: normalize and index a 10K-region topology.
fn bench_topology_build_10k(c: &mut Criterion) {
    let full = reference_topology();
    let records: Vec<RegionRecord> = full
        .iter()
        .map(|(_, r)| {
            RegionRecord::new(
                r.id.clone(),
                r.centroid.x,
                r.centroid.y,
                r.neighbors.iter().map(|&n| full.id(n).clone()),
            )
        })
        .collect();

    c.bench_function("topology_build_10k", |b| {
        b.iter(|| {
            let t = Topology::from_records(records.clone()).unwrap();
            black_box(t.len());
        });
    });
}

/// Benchmark: find the centermost of 10K regions.
fn bench_find_center_10k(c: &mut Criterion) {
    let t = reference_topology();
    c.bench_function("find_center_10k", |b| {
        b.iter(|| black_box(find_center(&t).unwrap()));
    });
}

/// Benchmark: full traversal of 10K regions, connected and fragmented.
fn bench_traversal_10k(c: &mut Criterion) {
    let levels = JurisdictionLevels::default();
    let connected = reference_topology();
    let fragmented = fragmented_topology();

    let mut group = c.benchmark_group("traversal_10k");
    for (name, t) in [("connected", &connected), ("fragmented", &fragmented)] {
        let start = find_center(t).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(Traversal::new(t, &levels, start).unwrap().count()));
        });
    }
    group.finish();
}

/// Benchmark: full layout of a 2,500-region lattice.
fn bench_layout_2500(c: &mut Criterion) {
    let t = tract_lattice(50, 50, 10);
    let engine = LayoutEngine::new(&t, reference_config(42)).unwrap();

    c.bench_function("layout_2500", |b| {
        b.iter(|| black_box(engine.run().unwrap().len()));
    });
}

/// Benchmark: full layout of the 10K-region reference lattice.
fn bench_layout_10k(c: &mut Criterion) {
    let t = reference_topology();
    let engine = LayoutEngine::new(&t, reference_config(42)).unwrap();

    let mut group = c.benchmark_group("layout_10k");
    group.sample_size(10);
    group.bench_function("reference", |b| {
        b.iter(|| black_box(engine.run().unwrap().metrics().tie_breaks));
    });
    group.finish();
}

/// Benchmark: full layout of the 40K-region stress lattice.
fn bench_layout_40k(c: &mut Criterion) {
    let t = stress_topology();
    let engine = LayoutEngine::new(&t, reference_config(42)).unwrap();

    let mut group = c.benchmark_group("layout_40k");
    group.sample_size(10);
    group.bench_function("stress", |b| {
        b.iter(|| black_box(engine.run().unwrap().metrics().tie_breaks));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_topology_build_10k,
    bench_find_center_10k,
    bench_traversal_10k,
    bench_layout_2500,
    bench_layout_10k,
    bench_layout_40k
);
criterion_main!(benches);
