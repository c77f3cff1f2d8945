//! Incremental grid state: occupied cells, the placement index, and the
//! free perimeter around them.
//!
//! [`GridState`] is grown one placement at a time by
//! [`GridAssigner`](crate::GridAssigner). Cells are never vacated, so the
//! only removal ever made is a perimeter cell consumed by a placement.
//! Iteration order of every collection is insertion order.

use cartogrid_core::{GridBounds, GridCoord, RegionIx};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// Occupied cells, their inverse, and the free 8-connected frontier.
///
/// Invariants, maintained by [`commit`](GridState::commit):
/// - `cells` and `placements` are mutual inverses of equal size.
/// - `perimeter` is exactly the set of free cells 8-adjacent to at least
///   one occupied cell.
#[derive(Clone, Debug)]
pub struct GridState {
    cells: IndexMap<GridCoord, RegionIx>,
    placements: Vec<Option<GridCoord>>,
    perimeter: IndexSet<GridCoord>,
    bounds: Option<GridBounds>,
    max_perimeter: usize,
}

impl GridState {
    /// An empty grid for a topology of `region_count` regions.
    pub fn new(region_count: usize) -> Self {
        Self {
            cells: IndexMap::with_capacity(region_count),
            placements: vec![None; region_count],
            perimeter: IndexSet::new(),
            bounds: None,
            max_perimeter: 0,
        }
    }

    /// Number of placed regions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Region occupying `coord`, if any.
    pub fn occupant(&self, coord: GridCoord) -> Option<RegionIx> {
        self.cells.get(&coord).copied()
    }

    /// Whether `coord` is occupied.
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Cell holding `region`, if it has been placed.
    pub fn coord_of(&self, region: RegionIx) -> Option<GridCoord> {
        self.placements.get(region.index()).copied().flatten()
    }

    /// Whether `region` has been placed.
    pub fn is_placed(&self, region: RegionIx) -> bool {
        self.coord_of(region).is_some()
    }

    /// The `i`-th placed region, in placement order.
    pub fn placed_at(&self, i: usize) -> Option<RegionIx> {
        self.cells.get_index(i).map(|(_, &r)| r)
    }

    /// Occupied cells in placement order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = (GridCoord, RegionIx)> + '_ {
        self.cells.iter().map(|(&c, &r)| (c, r))
    }

    /// Free cells bordering the occupied set, in insertion order.
    pub fn perimeter(&self) -> &IndexSet<GridCoord> {
        &self.perimeter
    }

    /// Whether `coord` is on the perimeter.
    pub fn on_perimeter(&self, coord: GridCoord) -> bool {
        self.perimeter.contains(&coord)
    }

    /// Largest perimeter size seen so far.
    pub fn max_perimeter(&self) -> usize {
        self.max_perimeter
    }

    /// Bounding rectangle of occupied cells, `None` while empty.
    pub fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Record `region` at `coord` and update the perimeter.
    ///
    /// Callers are expected to pick `coord` from the perimeter (or the
    /// origin for the first placement); this only guards against
    /// overlapping or repeated assignment.
    ///
    /// # Errors
    ///
    /// - [`CommitError::AlreadyPlaced`] if `region` is already on the grid.
    /// - [`CommitError::Occupied`] if `coord` is taken.
    ///
    /// # Panics
    ///
    /// Panics if `region` is out of range for this grid.
    pub fn commit(&mut self, region: RegionIx, coord: GridCoord) -> Result<(), CommitError> {
        if self.is_placed(region) {
            return Err(CommitError::AlreadyPlaced);
        }
        if self.is_occupied(coord) {
            return Err(CommitError::Occupied);
        }
        self.cells.insert(coord, region);
        self.placements[region.index()] = Some(coord);
        self.perimeter.shift_remove(&coord);
        for n in coord.neighbours() {
            if !self.cells.contains_key(&n) {
                self.perimeter.insert(n);
            }
        }
        self.max_perimeter = self.max_perimeter.max(self.perimeter.len());
        match &mut self.bounds {
            Some(b) => b.include(coord),
            None => self.bounds = Some(GridBounds::of(coord)),
        }
        Ok(())
    }
}

/// Why [`GridState::commit`] refused a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The region already has a cell.
    #[error("region already placed")]
    AlreadyPlaced,
    /// The cell already holds a region.
    #[error("cell already occupied")]
    Occupied,
}
