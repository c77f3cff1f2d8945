//! Input records consumed by [`Topology::from_records`](crate::Topology::from_records).

use cartogrid_core::{RegionId, Vec2};

/// Where a region came from in the upstream geometry source.
///
/// Opaque to the layout engine; carried through unmodified so renderers
/// can map grid cells back to source shapes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegionOrigin {
    /// Source file or dataset name.
    pub source: String,
    /// Record index within the source.
    pub index: usize,
}

impl RegionOrigin {
    /// Construct an origin descriptor.
    pub fn new(source: impl Into<String>, index: usize) -> Self {
        Self {
            source: source.into(),
            index,
        }
    }
}

/// One already-decoded input row: a region, its centroid, and its
/// neighbour ids in adjacency order.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionRecord {
    /// Hierarchical region id.
    pub id: RegionId,
    /// Upstream origin descriptor.
    pub origin: RegionOrigin,
    /// Centroid longitude.
    pub longitude: f64,
    /// Centroid latitude.
    pub latitude: f64,
    /// Ids of topologically adjacent regions.
    pub neighbors: Vec<RegionId>,
}

impl RegionRecord {
    /// Build a record with a default origin.
    pub fn new<I, S>(id: impl Into<RegionId>, longitude: f64, latitude: f64, neighbors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RegionId>,
    {
        Self {
            id: id.into(),
            origin: RegionOrigin::default(),
            longitude,
            latitude,
            neighbors: neighbors.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach an origin descriptor.
    pub fn with_origin(mut self, origin: RegionOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// The centroid as a vector (`x` = longitude, `y` = latitude).
    pub fn centroid(&self) -> Vec2 {
        Vec2::new(self.longitude, self.latitude)
    }
}
