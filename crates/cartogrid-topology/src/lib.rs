//! Region topology model for cartogrid.
//!
//! A [`Topology`] holds, for every region, its identifier, centroid, and
//! ordered neighbour list. It is built once from already-decoded
//! [`RegionRecord`]s and is read-only while a layout runs.
//!
//! [`find_center`] picks the deterministic starting region closest to the
//! mean of all centroids.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod center;
pub mod record;
pub mod topology;

pub use center::{centroid_mean, find_center};
pub use record::{RegionOrigin, RegionRecord};
pub use topology::{AdjacencyReport, Region, Topology};
