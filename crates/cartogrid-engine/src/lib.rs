//! Layout engine for cartogrid.
//!
//! Turns a [`Topology`](cartogrid_topology::Topology) into a [`GridLayout`]:
//! every region on exactly one integer cell, with grid adjacency tracking
//! real adjacency, grid directions tracking compass directions, and
//! jurisdictions kept together where possible.
//!
//! # Pipeline
//!
//! - [`Traversal`]: jurisdiction-aware breadth-first visiting order
//! - [`GridAssigner`]: greedy placement on the free perimeter
//! - [`LayoutEngine`] / [`LayoutRun`]: lockstep driver, seeded RNG, metrics
//!
//! The engine is single-threaded: each placement depends on the grid left
//! by the previous one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assigner;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hash;
pub mod layout;
pub mod metrics;
pub mod traversal;

pub use assigner::{reference_cost, GridAssigner, Placement, PlacementRule, ReferenceCost};
pub use config::{ConfigError, DegenerateOrientation, JurisdictionLevels, LayoutConfig, StartRegion};
pub use engine::{LayoutEngine, LayoutRun, PlacementProgress};
pub use error::LayoutError;
pub use grid::{CommitError, GridState};
pub use hash::layout_hash;
pub use layout::GridLayout;
pub use metrics::LayoutMetrics;
pub use traversal::Traversal;
