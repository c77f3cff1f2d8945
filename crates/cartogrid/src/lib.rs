//! Cartogrid: grid cartogram layout for hierarchically identified regions.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all cartogrid sub-crates. Feed it already-decoded region records
//! (id, centroid, neighbour ids) and get back one integer grid cell per
//! region.
//!
//! # Quick start
//!
//! ```rust
//! use cartogrid::prelude::*;
//!
//! // Three tracts in one county, west to east.
//! let topology = Topology::from_records(vec![
//!     RegionRecord::new("01001000100", 0.0, 0.0, ["01001000200"]),
//!     RegionRecord::new("01001000200", 1.0, 0.0, ["01001000100", "01001000300"]),
//!     RegionRecord::new("01001000300", 2.0, 0.0, ["01001000200"]),
//! ])
//! .unwrap();
//!
//! let config = LayoutConfig::default().with_seed(7).starting_at("01001000200");
//! let layout = LayoutEngine::new(&topology, config).unwrap().run().unwrap();
//!
//! assert_eq!(layout.len(), 3);
//! assert_eq!(layout.coord_of("01001000200"), Some(GridCoord::ORIGIN));
//! assert_eq!(layout.coord_of("01001000100"), Some(GridCoord::new(-1, 0)));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cartogrid-core` | Region ids, grid coordinates, vectors, topology errors |
//! | [`topology`] | `cartogrid-topology` | Region records, adjacency normalization, center finding |
//! | [`engine`] | `cartogrid-engine` | Traversal, grid assignment, layout driver, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Ids, coordinates, and geometry (`cartogrid-core`).
///
/// Contains [`types::RegionId`], [`types::GridCoord`], [`types::Vec2`],
/// and [`types::TopologyError`].
pub use cartogrid_core as types;

/// Region topology (`cartogrid-topology`).
///
/// Build a [`topology::Topology`] from [`topology::RegionRecord`]s and find
/// the centermost region with [`topology::find_center`].
pub use cartogrid_topology as topology;

/// Layout engine (`cartogrid-engine`).
///
/// [`engine::LayoutEngine`] runs a whole layout; [`engine::LayoutRun`]
/// steps through it one placement at a time.
pub use cartogrid_engine as engine;

/// Common imports for typical cartogrid usage.
///
/// ```rust
/// use cartogrid::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cartogrid_core::{GridBounds, GridCoord, RegionId, RegionIx, TopologyError, Vec2};

    // Topology
    pub use cartogrid_topology::{find_center, RegionOrigin, RegionRecord, Topology};

    // Engine
    pub use cartogrid_engine::{
        layout_hash, DegenerateOrientation, GridLayout, JurisdictionLevels, LayoutConfig,
        LayoutEngine, LayoutError, LayoutMetrics, StartRegion,
    };
}
