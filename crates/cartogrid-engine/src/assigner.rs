//! Greedy grid placement.
//!
//! [`GridAssigner`] commits regions to grid cells one at a time, in the
//! order a [`Traversal`](crate::Traversal) produces them. Each placement
//! runs in two phases:
//!
//! 1. **Candidate search.** For each jurisdiction precision, most specific
//!    first: score perimeter cells by how many same-jurisdiction placed
//!    neighbours they touch and keep the top scorers; failing that, keep
//!    perimeter cells that border enough placed regions of the same
//!    jurisdiction (more than a third of the best count). The first
//!    precision that yields anything wins.
//! 2. **Distortion tie-break.** When several candidates remain, compare
//!    grid directions with geographic directions against a small set of
//!    placed reference regions and keep the cell that bends them least.
//!
//! The first region always lands on [`GridCoord::ORIGIN`].

use cartogrid_core::{orientation_cost, GridCoord, RegionIx, Vec2};
use cartogrid_topology::Topology;
use indexmap::IndexMap;
use rand::Rng;
use smallvec::SmallVec;

use crate::config::{DegenerateOrientation, JurisdictionLevels, LayoutConfig};
use crate::error::LayoutError;
use crate::grid::{CommitError, GridState};

/// Cost charged for a degenerate reference under
/// [`DegenerateOrientation::NeutralCost`].
const NEUTRAL_COST: f64 = 0.5;

/// Which rule produced the winning cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementRule {
    /// First region, placed at the origin.
    Origin,
    /// Perimeter cells touching placed neighbours at this precision.
    Adjacency {
        /// Jurisdiction precision that matched.
        precision: usize,
    },
    /// Perimeter cells bordering same-jurisdiction regions at this precision.
    Contiguity {
        /// Jurisdiction precision that matched.
        precision: usize,
    },
}

/// Outcome of one [`GridAssigner::place`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// The placed region.
    pub region: RegionIx,
    /// Where it went.
    pub coord: GridCoord,
    /// Which rule produced the candidate set.
    pub rule: PlacementRule,
    /// Size of the candidate set.
    pub candidates: usize,
    /// Reference regions used in the tie-break (0 if there was none).
    pub references: usize,
    /// Reference/candidate pairs that hit the zero-length vector policy.
    pub degenerate_vectors: usize,
    /// Total distortion of the chosen cell (0 if there was no tie-break).
    pub distortion: f64,
}

/// Places regions on the grid, owning the evolving [`GridState`].
pub struct GridAssigner<'t> {
    topology: &'t Topology,
    levels: &'t JurisdictionLevels,
    reference_count: usize,
    degenerate: DegenerateOrientation,
    state: GridState,
}

impl<'t> GridAssigner<'t> {
    /// An assigner with an empty grid.
    pub fn new(topology: &'t Topology, config: &'t LayoutConfig) -> Self {
        Self {
            topology,
            levels: &config.precisions,
            reference_count: config.reference_count,
            degenerate: config.degenerate_orientation,
            state: GridState::new(topology.len()),
        }
    }

    /// Current grid state.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Consume the assigner, keeping the grid.
    pub fn into_state(self) -> GridState {
        self.state
    }

    /// Place `region` and return where it went and why.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::AlreadyPlaced`] if `region` is already on the grid.
    /// - [`LayoutError::InternalInvariantViolation`] if no precision
    ///   produced a candidate cell.
    pub fn place<R: Rng>(&mut self, region: RegionIx, rng: &mut R) -> Result<Placement, LayoutError> {
        if self.state.is_placed(region) {
            return Err(LayoutError::AlreadyPlaced {
                region: self.topology.id(region).clone(),
            });
        }

        if self.state.is_empty() {
            self.commit(region, GridCoord::ORIGIN)?;
            return Ok(Placement {
                region,
                coord: GridCoord::ORIGIN,
                rule: PlacementRule::Origin,
                candidates: 1,
                references: 0,
                degenerate_vectors: 0,
                distortion: 0.0,
            });
        }

        let (candidates, rule) =
            self.candidate_cells(region)
                .ok_or_else(|| LayoutError::InternalInvariantViolation {
                    region: self.topology.id(region).clone(),
                    placed: self.state.len(),
                })?;

        let mut placement = Placement {
            region,
            coord: candidates[0],
            rule,
            candidates: candidates.len(),
            references: 0,
            degenerate_vectors: 0,
            distortion: 0.0,
        };
        if candidates.len() > 1 {
            let references = self.reference_regions(region, rng);
            let (coord, distortion, degenerate) =
                self.least_distorted(region, &references, &candidates);
            placement.coord = coord;
            placement.references = references.len();
            placement.degenerate_vectors = degenerate;
            placement.distortion = distortion;
        }

        self.commit(region, placement.coord)?;
        Ok(placement)
    }

    fn commit(&mut self, region: RegionIx, coord: GridCoord) -> Result<(), LayoutError> {
        let topology = self.topology;
        self.state.commit(region, coord).map_err(|e| match e {
            CommitError::AlreadyPlaced => LayoutError::AlreadyPlaced {
                region: topology.id(region).clone(),
            },
            CommitError::Occupied => LayoutError::CellOccupied { coord },
        })
    }

    /// Candidate cells for `region`, in deterministic order, or `None`
    /// if every precision came up empty.
    fn candidate_cells(&self, region: RegionIx) -> Option<(Vec<GridCoord>, PlacementRule)> {
        for precision in self.levels.iter() {
            let cells = self.adjacency_candidates(region, precision);
            if !cells.is_empty() {
                return Some((cells, PlacementRule::Adjacency { precision }));
            }
            let cells = self.contiguity_candidates(region, precision);
            if !cells.is_empty() {
                return Some((cells, PlacementRule::Contiguity { precision }));
            }
        }
        None
    }

    /// Perimeter cells touching the most placed same-jurisdiction
    /// neighbours of `region`.
    fn adjacency_candidates(&self, region: RegionIx, precision: usize) -> Vec<GridCoord> {
        let topology = self.topology;
        let prefix = topology.id(region).prefix(precision);

        let mut scores: IndexMap<GridCoord, u32> = IndexMap::new();
        for &n in topology.neighbors(region) {
            if topology.id(n).prefix(precision) != prefix {
                continue;
            }
            let Some(at) = self.state.coord_of(n) else {
                continue;
            };
            for g in at.neighbours() {
                if self.state.on_perimeter(g) {
                    *scores.entry(g).or_insert(0) += 1;
                }
            }
        }

        let Some(&best) = scores.values().max() else {
            return Vec::new();
        };
        scores
            .into_iter()
            .filter(|&(_, s)| s == best)
            .map(|(g, _)| g)
            .collect()
    }

    /// Perimeter cells bordering more than a third of the best count of
    /// placed regions sharing `region`'s jurisdiction.
    fn contiguity_candidates(&self, region: RegionIx, precision: usize) -> Vec<GridCoord> {
        let topology = self.topology;
        let prefix = topology.id(region).prefix(precision);

        let counts: Vec<(GridCoord, u32)> = self
            .state
            .perimeter()
            .iter()
            .map(|&p| {
                let count = p
                    .neighbours()
                    .into_iter()
                    .filter(|&g| {
                        self.state
                            .occupant(g)
                            .is_some_and(|o| topology.id(o).prefix(precision) == prefix)
                    })
                    .count();
                (p, count as u32)
            })
            .collect();

        let best = counts.iter().map(|&(_, c)| c).max().unwrap_or(0);
        if best == 0 {
            return Vec::new();
        }
        counts
            .into_iter()
            .filter(|&(_, c)| 3 * c > best)
            .map(|(p, _)| p)
            .collect()
    }

    /// Placed regions to orient against: every placed neighbour, padded
    /// with randomly sampled placed regions up to `reference_count`.
    fn reference_regions<R: Rng>(&self, region: RegionIx, rng: &mut R) -> SmallVec<[RegionIx; 8]> {
        let mut refs: SmallVec<[RegionIx; 8]> = self
            .topology
            .neighbors(region)
            .iter()
            .copied()
            .filter(|&n| self.state.is_placed(n))
            .collect();
        if refs.len() >= self.reference_count {
            return refs;
        }

        let own = refs.len();
        let placed = self.state.len();
        let need = self.reference_count - own;
        let available = placed - own;

        if available <= need {
            for (_, r) in self.state.cells() {
                if !refs.contains(&r) {
                    refs.push(r);
                }
            }
            return refs;
        }

        // At most `own` of the drawn indices can repeat a neighbour.
        let drawn = rand::seq::index::sample(rng, placed, own + need);
        for i in drawn.iter() {
            if refs.len() == own + need {
                break;
            }
            if let Some(r) = self.state.placed_at(i) {
                if !refs.contains(&r) {
                    refs.push(r);
                }
            }
        }
        refs
    }

    /// The candidate with the least total distortion against `references`.
    ///
    /// Returns the cell, its distortion, and how many reference/candidate
    /// pairs were degenerate. Ties go to the earliest candidate.
    fn least_distorted(
        &self,
        region: RegionIx,
        references: &[RegionIx],
        candidates: &[GridCoord],
    ) -> (GridCoord, f64, usize) {
        let origin = self.topology.centroid(region);
        let anchors: SmallVec<[(GridCoord, Vec2); 8]> = references
            .iter()
            .filter_map(|&n| {
                let at = self.state.coord_of(n)?;
                Some((at, self.topology.centroid(n) - origin))
            })
            .collect();

        let mut degenerate = 0;
        let mut best = (candidates[0], f64::INFINITY);
        for &g in candidates {
            let mut total = 0.0;
            for &(at, geo) in &anchors {
                let grid = Vec2::grid_displacement(g, at);
                match reference_cost(geo, grid, self.degenerate) {
                    ReferenceCost::Scored(cost) => total += cost,
                    ReferenceCost::Degenerate(cost) => {
                        degenerate += 1;
                        total += cost;
                    }
                }
            }
            if total < best.1 {
                best = (g, total);
            }
        }
        (best.0, best.1, degenerate)
    }
}

/// Contribution of one reference region to a candidate's distortion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReferenceCost {
    /// Regular cost in `[0, 1]`.
    Scored(f64),
    /// A vector had zero length; the policy decided the cost.
    Degenerate(f64),
}

impl ReferenceCost {
    /// The cost to add to the candidate's total.
    pub fn value(self) -> f64 {
        match self {
            Self::Scored(c) | Self::Degenerate(c) => c,
        }
    }
}

/// Orientation cost of placing a region so that a reference sits at grid
/// displacement `grid` when it lies at geographic displacement `geo`.
///
/// 0 when the two directions agree, 0.5 when perpendicular, 1 when
/// opposite. A zero-length vector is resolved by `policy`.
pub fn reference_cost(geo: Vec2, grid: Vec2, policy: DegenerateOrientation) -> ReferenceCost {
    match geo.cosine(grid) {
        Some(cos) => ReferenceCost::Scored(orientation_cost(cos)),
        None => ReferenceCost::Degenerate(match policy {
            DegenerateOrientation::NeutralCost => NEUTRAL_COST,
            DegenerateOrientation::Exclude => 0.0,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartogrid_topology::RegionRecord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f64 = 1e-12;

    fn rec(id: &str, x: f64, y: f64, neighbors: &[&str]) -> RegionRecord {
        RegionRecord::new(id, x, y, neighbors.iter().copied())
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    // ── reference_cost ─────────────────────────────────────────────

    #[test]
    fn parallel_vectors_cost_nothing() {
        let c = reference_cost(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0), Default::default());
        assert!(c.value().abs() < EPS);
    }

    #[test]
    fn antiparallel_vectors_cost_one() {
        let c = reference_cost(Vec2::new(0.0, 2.0), Vec2::new(0.0, -1.0), Default::default());
        assert!((c.value() - 1.0).abs() < EPS);
    }

    #[test]
    fn perpendicular_vectors_cost_half() {
        let c = reference_cost(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Default::default());
        assert!((c.value() - 0.5).abs() < EPS);
    }

    #[test]
    fn zero_geo_vector_follows_policy() {
        let grid = Vec2::new(1.0, 0.0);
        assert_eq!(
            reference_cost(Vec2::ZERO, grid, DegenerateOrientation::NeutralCost),
            ReferenceCost::Degenerate(0.5)
        );
        assert_eq!(
            reference_cost(Vec2::ZERO, grid, DegenerateOrientation::Exclude),
            ReferenceCost::Degenerate(0.0)
        );
    }

    // ── placement ─────────────────────────────────────────────────

    #[test]
    fn first_region_goes_to_origin() {
        let t = Topology::from_records(vec![rec("a", 0.0, 0.0, &[])]).unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        let p = a.place(RegionIx(0), &mut rng()).unwrap();
        assert_eq!(p.coord, GridCoord::ORIGIN);
        assert_eq!(p.rule, PlacementRule::Origin);
        assert_eq!(a.state().perimeter().len(), 8);
    }

    #[test]
    fn neighbour_to_the_north_goes_above() {
        let t = Topology::from_records(vec![
            rec("01001000001", 0.0, 0.0, &["01001000002"]),
            rec("01001000002", 0.0, 1.0, &["01001000001"]),
        ])
        .unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        a.place(RegionIx(0), &mut rng()).unwrap();
        let p = a.place(RegionIx(1), &mut rng()).unwrap();
        assert_eq!(p.rule, PlacementRule::Adjacency { precision: 5 });
        assert_eq!(p.candidates, 8);
        assert_eq!(p.coord, GridCoord::new(0, -1));
        assert!(p.distortion.abs() < EPS);
    }

    #[test]
    fn cell_touching_two_neighbours_beats_cells_touching_one() {
        // c borders both a and b, which sit side by side.
        let t = Topology::from_records(vec![
            rec("01001000001", 0.0, 0.0, &["01001000002", "01001000003"]),
            rec("01001000002", 1.0, 0.0, &["01001000001", "01001000003"]),
            rec("01001000003", 0.5, -1.0, &["01001000001", "01001000002"]),
        ])
        .unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        let mut r = rng();
        a.place(RegionIx(0), &mut r).unwrap();
        let pb = a.place(RegionIx(1), &mut r).unwrap();
        assert_eq!(pb.coord, GridCoord::new(1, 0));
        let pc = a.place(RegionIx(2), &mut r).unwrap();
        // Shared cells of (0,0) and (1,0): (0,±1) and (1,±1); south wins.
        assert_eq!(pc.candidates, 4);
        assert!(pc.coord.y == 1, "expected a southern cell, got {}", pc.coord);
    }

    #[test]
    fn region_without_placed_neighbours_uses_contiguity() {
        let t = Topology::from_records(vec![
            rec("01001000001", 0.0, 0.0, &[]),
            rec("01001000002", 1.0, 0.0, &[]),
        ])
        .unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        let mut r = rng();
        a.place(RegionIx(0), &mut r).unwrap();
        let p = a.place(RegionIx(1), &mut r).unwrap();
        assert_eq!(p.rule, PlacementRule::Contiguity { precision: 5 });
        assert_eq!(p.coord, GridCoord::new(1, 0));
        assert_eq!(p.references, 1);
    }

    #[test]
    fn other_state_falls_through_to_catch_all() {
        let t = Topology::from_records(vec![
            rec("01001000001", 0.0, 0.0, &[]),
            rec("02001000001", 0.0, -1.0, &[]),
        ])
        .unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        let mut r = rng();
        a.place(RegionIx(0), &mut r).unwrap();
        let p = a.place(RegionIx(1), &mut r).unwrap();
        assert_eq!(p.rule, PlacementRule::Contiguity { precision: 0 });
        assert_eq!(p.coord, GridCoord::new(0, 1));
    }

    #[test]
    fn double_placement_is_an_error() {
        let t = Topology::from_records(vec![rec("a", 0.0, 0.0, &[])]).unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        a.place(RegionIx(0), &mut rng()).unwrap();
        assert!(matches!(
            a.place(RegionIx(0), &mut rng()),
            Err(LayoutError::AlreadyPlaced { .. })
        ));
    }

    #[test]
    fn coincident_centroid_is_degenerate_not_nan() {
        let t = Topology::from_records(vec![
            rec("01001000001", 0.0, 0.0, &["01001000002"]),
            rec("01001000002", 0.0, 0.0, &["01001000001"]),
        ])
        .unwrap();
        for policy in [DegenerateOrientation::NeutralCost, DegenerateOrientation::Exclude] {
            let config = LayoutConfig::default().with_degenerate_orientation(policy);
            let mut a = GridAssigner::new(&t, &config);
            let mut r = rng();
            a.place(RegionIx(0), &mut r).unwrap();
            let p = a.place(RegionIx(1), &mut r).unwrap();
            assert_eq!(p.degenerate_vectors, 8);
            assert!(p.distortion.is_finite());
            // Every candidate scores the same, so the first one wins.
            assert_eq!(p.coord, GridCoord::ORIGIN.neighbours()[0]);
        }
    }

    #[test]
    fn references_pad_with_placed_regions() {
        let t = Topology::from_records(
            (0..8).map(|i| rec(&format!("0100100000{i}"), i as f64, 0.0, &[])),
        )
        .unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        let mut r = rng();
        for i in 0..7 {
            a.place(RegionIx(i), &mut r).unwrap();
        }
        let refs = a.reference_regions(RegionIx(7), &mut r);
        assert_eq!(refs.len(), 5);
        let mut unique = refs.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
        assert!(refs.iter().all(|&x| a.state().is_placed(x)));
    }

    #[test]
    fn references_keep_every_placed_neighbour() {
        let t = Topology::from_records(vec![
            rec("x0", 0.0, 0.0, &["x1", "x2"]),
            rec("x1", 1.0, 0.0, &[]),
            rec("x2", 2.0, 0.0, &[]),
            rec("x3", 3.0, 0.0, &[]),
        ])
        .unwrap();
        let config = LayoutConfig::default();
        let mut a = GridAssigner::new(&t, &config);
        let mut r = rng();
        for i in 1..4 {
            a.place(RegionIx(i), &mut r).unwrap();
        }
        let refs = a.reference_regions(RegionIx(0), &mut r);
        assert_eq!(&refs[..2], &[RegionIx(1), RegionIx(2)]);
        assert_eq!(refs.len(), 3);
    }
}
