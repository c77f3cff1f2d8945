//! Core types for the cartogrid layout engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: region identifiers
//! and jurisdiction prefixes, integer grid coordinates, the 2D vector math
//! used for orientation scoring, and topology error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod geometry;
pub mod id;

pub use coord::{GridBounds, GridCoord};
pub use error::TopologyError;
pub use geometry::{orientation_cost, Vec2};
pub use id::{jurisdiction_prefix, RegionId, RegionIx};
