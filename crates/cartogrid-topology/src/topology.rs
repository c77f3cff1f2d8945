//! The region topology model and its builder.

use cartogrid_core::{RegionId, RegionIx, TopologyError, Vec2};
use indexmap::map::Entry;
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::record::{RegionOrigin, RegionRecord};

/// A region as seen by the layout engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Hierarchical region id.
    pub id: RegionId,
    /// Upstream origin descriptor, carried through unmodified.
    pub origin: RegionOrigin,
    /// Centroid (`x` = longitude, `y` = latitude).
    pub centroid: Vec2,
    /// Neighbours in adjacency order, resolved to indices.
    ///
    /// Never contains the region itself or duplicates, and the relation
    /// is symmetric across the topology.
    pub neighbors: SmallVec<[RegionIx; 8]>,
}

/// What [`Topology::from_records`] had to fix in the raw adjacency lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyReport {
    /// Neighbour entries naming the region itself, dropped.
    pub self_references: usize,
    /// Repeated neighbour entries, dropped.
    pub duplicates: usize,
    /// Reverse edges appended to make adjacency symmetric.
    pub reverse_edges: usize,
}

impl AdjacencyReport {
    /// Whether the input adjacency was already clean and symmetric.
    pub fn is_clean(&self) -> bool {
        self.self_references == 0 && self.duplicates == 0 && self.reverse_edges == 0
    }
}

/// Read-only region graph: ids, centroids, and symmetric adjacency.
///
/// Regions are stored in input order; [`RegionIx`] values index into that
/// order and every deterministic scan follows it.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    regions: IndexMap<RegionId, Region>,
    report: AdjacencyReport,
}

impl Topology {
    /// Build a topology from decoded input records.
    ///
    /// Neighbour lists are normalized: self-references and repeated
    /// entries are dropped, and a one-directional adjacency `a -> b` gets
    /// `a` appended to the end of `b`'s list. Neighbour order is otherwise
    /// preserved.
    ///
    /// An empty record set yields an empty topology; layout runs reject it.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::DuplicateRegion`] if two records share an id.
    /// - [`TopologyError::NonFiniteCentroid`] for NaN/infinite coordinates.
    /// - [`TopologyError::UnknownNeighborReference`] if a neighbour id
    ///   names no record.
    pub fn from_records<I>(records: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = RegionRecord>,
    {
        let records = records.into_iter();
        let mut regions: IndexMap<RegionId, Region> = IndexMap::with_capacity(records.size_hint().0);
        let mut raw_neighbors: Vec<Vec<RegionId>> = Vec::with_capacity(records.size_hint().0);

        for record in records {
            let centroid = record.centroid();
            if !centroid.is_finite() {
                return Err(TopologyError::NonFiniteCentroid { region: record.id });
            }
            match regions.entry(record.id) {
                Entry::Occupied(e) => {
                    return Err(TopologyError::DuplicateRegion {
                        region: e.key().clone(),
                    });
                }
                Entry::Vacant(e) => {
                    let id = e.key().clone();
                    e.insert(Region {
                        id,
                        origin: record.origin,
                        centroid,
                        neighbors: SmallVec::new(),
                    });
                }
            }
            raw_neighbors.push(record.neighbors);
        }

        let mut report = AdjacencyReport::default();
        for (i, raw) in raw_neighbors.into_iter().enumerate() {
            let mut resolved: SmallVec<[RegionIx; 8]> = SmallVec::with_capacity(raw.len());
            for neighbor in raw {
                let Some(j) = regions.get_index_of(neighbor.as_str()) else {
                    return Err(TopologyError::UnknownNeighborReference {
                        region: regions[i].id.clone(),
                        neighbor,
                    });
                };
                if j == i {
                    report.self_references += 1;
                    continue;
                }
                let ix = to_ix(j);
                if resolved.contains(&ix) {
                    report.duplicates += 1;
                    continue;
                }
                resolved.push(ix);
            }
            regions[i].neighbors = resolved;
        }

        // Collect first, then append, so the scan sees only input edges.
        let mut missing: Vec<(usize, RegionIx)> = Vec::new();
        for (i, region) in regions.values().enumerate() {
            let ix = to_ix(i);
            for &n in &region.neighbors {
                if !regions[n.index()].neighbors.contains(&ix) {
                    missing.push((n.index(), ix));
                }
            }
        }
        report.reverse_edges = missing.len();
        for (target, ix) in missing {
            regions[target].neighbors.push(ix);
        }

        if !report.is_clean() {
            warn!(
                self_references = report.self_references,
                duplicates = report.duplicates,
                reverse_edges = report.reverse_edges,
                "normalized region adjacency"
            );
        }
        debug!(regions = regions.len(), "built topology");

        Ok(Self { regions, report })
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the topology holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Adjacency fixes applied during construction.
    pub fn adjacency_report(&self) -> AdjacencyReport {
        self.report
    }

    /// Region at `ix`.
    ///
    /// # Panics
    ///
    /// Panics if `ix` is out of range; indices come from this topology.
    pub fn region(&self, ix: RegionIx) -> &Region {
        &self.regions[ix.index()]
    }

    /// Id of the region at `ix`.
    pub fn id(&self, ix: RegionIx) -> &RegionId {
        &self.region(ix).id
    }

    /// Centroid of the region at `ix`.
    pub fn centroid(&self, ix: RegionIx) -> Vec2 {
        self.region(ix).centroid
    }

    /// Neighbours of the region at `ix`, in adjacency order.
    pub fn neighbors(&self, ix: RegionIx) -> &[RegionIx] {
        &self.region(ix).neighbors
    }

    /// Index of the region with the given id.
    pub fn index_of(&self, id: &str) -> Option<RegionIx> {
        self.regions.get_index_of(id).map(to_ix)
    }

    /// Index of the region with the given id, as a `Result`.
    ///
    /// # Errors
    ///
    /// [`TopologyError::UnknownRegion`] if no region has that id.
    pub fn require(&self, id: &str) -> Result<RegionIx, TopologyError> {
        self.index_of(id).ok_or_else(|| TopologyError::UnknownRegion {
            region: RegionId::from(id),
        })
    }

    /// Region with the given id.
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    /// All regions with their indices, in input order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (RegionIx, &Region)> + '_ {
        self.regions.values().enumerate().map(|(i, r)| (to_ix(i), r))
    }

    /// All region indices, ascending.
    pub fn indices(&self) -> impl ExactSizeIterator<Item = RegionIx> {
        (0..self.regions.len()).map(to_ix)
    }

    /// Whether regions `a` and `b` share the id prefix of length `precision`.
    pub fn same_jurisdiction(&self, a: RegionIx, b: RegionIx, precision: usize) -> bool {
        self.id(a).same_jurisdiction(self.id(b), precision)
    }
}

/// Region counts fit in `u32`; realistic inputs are tens of thousands.
fn to_ix(i: usize) -> RegionIx {
    RegionIx(i as u32)
}
