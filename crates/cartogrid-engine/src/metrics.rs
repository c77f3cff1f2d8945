//! Per-run layout metrics.
//!
//! [`LayoutMetrics`] summarizes how a run placed its regions: which rule
//! produced each cell, how often the traversal had to jump, and how often
//! the distortion tie-break ran.

use crate::assigner::{Placement, PlacementRule};

/// Counters collected over one layout run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutMetrics {
    /// Regions placed.
    pub regions: usize,
    /// Traversal jumps to non-adjacent regions.
    pub traversal_jumps: usize,
    /// Placements decided by direct adjacency to placed neighbours.
    pub adjacency_placements: usize,
    /// Placements decided by jurisdiction contiguity.
    pub contiguity_placements: usize,
    /// Placements that fell through to precision 0 (no shared jurisdiction).
    pub catch_all_placements: usize,
    /// Placements with more than one candidate cell.
    pub tie_breaks: usize,
    /// Reference/candidate pairs resolved by the zero-length vector policy.
    pub degenerate_vectors: usize,
    /// Sum of the chosen cells' distortion over all tie-breaks.
    pub total_distortion: f64,
    /// Largest perimeter size reached.
    pub max_perimeter: usize,
    /// Wall-clock time for the run, in microseconds.
    pub elapsed_us: u64,
}

impl LayoutMetrics {
    /// Fold one placement into the counters.
    pub fn record(&mut self, placement: &Placement) {
        self.regions += 1;
        match placement.rule {
            PlacementRule::Origin => {}
            PlacementRule::Adjacency { precision } => {
                self.adjacency_placements += 1;
                if precision == 0 {
                    self.catch_all_placements += 1;
                }
            }
            PlacementRule::Contiguity { precision } => {
                self.contiguity_placements += 1;
                if precision == 0 {
                    self.catch_all_placements += 1;
                }
            }
        }
        if placement.candidates > 1 {
            self.tie_breaks += 1;
        }
        self.degenerate_vectors += placement.degenerate_vectors;
        self.total_distortion += placement.distortion;
    }

    /// Mean distortion of the chosen cell per tie-break, 0 if none ran.
    pub fn mean_distortion(&self) -> f64 {
        if self.tie_breaks == 0 {
            return 0.0;
        }
        self.total_distortion / self.tie_breaks as f64
    }
}
