//! Layout engine: traversal and placement in lockstep.
//!
//! [`LayoutEngine`] validates a configuration against a topology once;
//! each [`start()`](LayoutEngine::start) opens a fresh [`LayoutRun`] that
//! owns all mutable state of one run (traversal queue, remaining set,
//! grid, placement index, perimeter, RNG). A run alternates strictly:
//! one region is produced, then immediately placed, before the next is
//! produced.
//!
//! # Determinism
//!
//! Every random choice draws from one `ChaCha8Rng` seeded with
//! [`LayoutConfig::seed`]; all tie-breaks follow insertion order. The same
//! topology, configuration, and seed reproduce a bit-identical layout.

use std::time::Instant;

use cartogrid_core::{GridCoord, RegionId, TopologyError};
use cartogrid_topology::{find_center, Topology};
use indexmap::IndexMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::assigner::{GridAssigner, Placement, PlacementRule};
use crate::config::{LayoutConfig, StartRegion};
use crate::error::LayoutError;
use crate::grid::GridState;
use crate::layout::GridLayout;
use crate::metrics::LayoutMetrics;
use crate::traversal::Traversal;

// ── PlacementProgress ──────────────────────────────────────────────

/// Passed to the progress callback once per placed region.
#[derive(Clone, Copy, Debug)]
pub struct PlacementProgress<'a> {
    /// Regions placed so far, including this one.
    pub placed: usize,
    /// Regions in the topology.
    pub total: usize,
    /// The region just placed.
    pub region: &'a RegionId,
    /// Where it went.
    pub coord: GridCoord,
}

// ── LayoutEngine ──────────────────────────────────────────────────

/// Validated pairing of a topology and a layout configuration.
///
/// # Example
///
/// ```
/// use cartogrid_core::GridCoord;
/// use cartogrid_engine::{LayoutConfig, LayoutEngine};
/// use cartogrid_topology::{RegionRecord, Topology};
///
/// // Two tracts in one county, the second due south of the first.
/// let topology = Topology::from_records(vec![
///     RegionRecord::new("01001000100", 0.0, 1.0, ["01001000200"]),
///     RegionRecord::new("01001000200", 0.0, 0.0, ["01001000100"]),
/// ])
/// .unwrap();
///
/// let config = LayoutConfig::default().with_seed(42).starting_at("01001000100");
/// let engine = LayoutEngine::new(&topology, config).unwrap();
/// let layout = engine.run().unwrap();
///
/// assert_eq!(layout.coord_of("01001000100"), Some(GridCoord::ORIGIN));
/// assert_eq!(layout.coord_of("01001000200"), Some(GridCoord::new(0, 1)));
/// for (coord, id) in layout.iter() {
///     println!("{coord} {id}");
/// }
/// ```
#[derive(Debug)]
pub struct LayoutEngine<'t> {
    topology: &'t Topology,
    config: LayoutConfig,
}

impl<'t> LayoutEngine<'t> {
    /// Pair `topology` with `config` after validating both.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::Config`] if the configuration is invalid.
    /// - [`LayoutError::Topology`] if the topology is empty or an explicit
    ///   start region does not exist.
    pub fn new(topology: &'t Topology, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        if topology.is_empty() {
            return Err(TopologyError::EmptyTopology.into());
        }
        if let StartRegion::Explicit(id) = &config.start {
            topology.require(id.as_str())?;
        }
        Ok(Self { topology, config })
    }

    /// The topology being laid out.
    pub fn topology(&self) -> &'t Topology {
        self.topology
    }

    /// The run configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Open a new run with fresh state.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Topology`] if the start region cannot be
    /// resolved.
    pub fn start(&self) -> Result<LayoutRun<'_>, LayoutError> {
        let topology = self.topology;
        let levels = &self.config.precisions;
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let traversal = match &self.config.start {
            StartRegion::Centermost => Traversal::new(topology, levels, find_center(topology)?)?,
            StartRegion::Random => Traversal::with_random_start(topology, levels, &mut rng)?,
            StartRegion::Explicit(id) => {
                Traversal::new(topology, levels, topology.require(id.as_str())?)?
            }
        };

        info!(
            regions = topology.len(),
            seed = self.config.seed,
            start = ?self.config.start,
            "starting layout run"
        );

        Ok(LayoutRun {
            topology,
            traversal,
            assigner: GridAssigner::new(topology, &self.config),
            rng,
            metrics: LayoutMetrics::default(),
            started: Instant::now(),
        })
    }

    /// Lay out every region.
    ///
    /// # Errors
    ///
    /// Any [`LayoutError`] aborts the run.
    pub fn run(&self) -> Result<GridLayout, LayoutError> {
        self.run_with_progress(|_| {})
    }

    /// Lay out every region, calling `progress` after each placement.
    ///
    /// The callback observes the run; it cannot influence it.
    ///
    /// # Errors
    ///
    /// Any [`LayoutError`] aborts the run.
    pub fn run_with_progress<F>(&self, mut progress: F) -> Result<GridLayout, LayoutError>
    where
        F: FnMut(&PlacementProgress<'_>),
    {
        let total = self.topology.len();
        let mut run = self.start()?;
        while let Some(placement) = run.step()? {
            progress(&PlacementProgress {
                placed: run.state().len(),
                total,
                region: self.topology.id(placement.region),
                coord: placement.coord,
            });
        }
        run.finish()
    }
}

// ── LayoutRun ─────────────────────────────────────────────────────

/// State of one in-progress layout run.
///
/// Drive it with [`step()`](LayoutRun::step) to inspect the grid between
/// placements, or call [`finish()`](LayoutRun::finish) to complete it.
pub struct LayoutRun<'e> {
    topology: &'e Topology,
    traversal: Traversal<'e>,
    assigner: GridAssigner<'e>,
    rng: ChaCha8Rng,
    metrics: LayoutMetrics,
    started: Instant,
}

impl LayoutRun<'_> {
    /// Produce the next region and place it.
    ///
    /// Returns `Ok(None)` once every region is placed.
    ///
    /// # Errors
    ///
    /// Any placement failure; the run must then be discarded.
    pub fn step(&mut self) -> Result<Option<Placement>, LayoutError> {
        let Some(region) = self.traversal.next() else {
            return Ok(None);
        };
        let placement = self.assigner.place(region, &mut self.rng)?;
        self.metrics.record(&placement);

        match placement.rule {
            PlacementRule::Contiguity { precision } => debug!(
                region = %self.topology.id(region),
                coord = %placement.coord,
                precision,
                candidates = placement.candidates,
                "placed by jurisdiction contiguity"
            ),
            _ => trace!(
                region = %self.topology.id(region),
                coord = %placement.coord,
                candidates = placement.candidates,
                "placed"
            ),
        }
        Ok(Some(placement))
    }

    /// Whether regions remain to be placed.
    pub fn has_next(&self) -> bool {
        self.traversal.has_next()
    }

    /// Regions not yet placed.
    pub fn remaining(&self) -> usize {
        self.traversal.remaining()
    }

    /// Grid state so far.
    pub fn state(&self) -> &GridState {
        self.assigner.state()
    }

    /// Metrics so far.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Place any remaining regions and return the layout.
    ///
    /// # Errors
    ///
    /// Any placement failure while completing the run.
    pub fn finish(mut self) -> Result<GridLayout, LayoutError> {
        while self.step()?.is_some() {}

        let state = self.assigner.into_state();
        let mut metrics = self.metrics;
        metrics.traversal_jumps = self.traversal.jumps();
        metrics.max_perimeter = state.max_perimeter();
        metrics.elapsed_us = self.started.elapsed().as_micros() as u64;

        let cells: IndexMap<GridCoord, RegionId> = state
            .cells()
            .map(|(c, r)| (c, self.topology.id(r).clone()))
            .collect();
        let layout = GridLayout::new(cells, metrics);

        if let Some(b) = layout.bounds() {
            let m = layout.metrics();
            info!(
                regions = layout.len(),
                width = b.width(),
                height = b.height(),
                traversal_jumps = m.traversal_jumps,
                tie_breaks = m.tie_breaks,
                elapsed_us = m.elapsed_us,
                "layout complete"
            );
        }
        Ok(layout)
    }
}
