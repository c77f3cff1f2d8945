//! The finished layout handed to renderers.

use cartogrid_core::{GridBounds, GridCoord, RegionId};
use indexmap::IndexMap;

use crate::metrics::LayoutMetrics;

/// A completed grid layout: every region on exactly one cell.
///
/// Both mappings iterate in placement order. Rows run north to south
/// (ascending `y`), columns west to east (ascending `x`).
#[derive(Clone, Debug, Default)]
pub struct GridLayout {
    cells: IndexMap<GridCoord, RegionId>,
    placements: IndexMap<RegionId, GridCoord>,
    bounds: Option<GridBounds>,
    metrics: LayoutMetrics,
}

impl GridLayout {
    pub(crate) fn new(cells: IndexMap<GridCoord, RegionId>, metrics: LayoutMetrics) -> Self {
        let placements = cells.iter().map(|(&c, id)| (id.clone(), c)).collect();
        let bounds = GridBounds::from_coords(cells.keys().copied());
        Self {
            cells,
            placements,
            bounds,
            metrics,
        }
    }

    /// Number of placed regions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the layout holds no regions.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells and their regions, in placement order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (GridCoord, &RegionId)> + '_ {
        self.cells.iter().map(|(&c, id)| (c, id))
    }

    /// Region at `coord`, if occupied.
    pub fn get(&self, coord: GridCoord) -> Option<&RegionId> {
        self.cells.get(&coord)
    }

    /// Cell of the region with id `id`.
    pub fn coord_of(&self, id: &str) -> Option<GridCoord> {
        self.placements.get(id).copied()
    }

    /// Bounding rectangle of occupied cells; `None` only for an empty layout.
    pub fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Metrics collected while building the layout.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// One row of the bounding rectangle, west to east; `None` for empty cells.
    pub fn row(&self, y: i32) -> Vec<Option<&RegionId>> {
        let Some(b) = self.bounds else {
            return Vec::new();
        };
        (b.min_x..=b.max_x)
            .map(|x| self.cells.get(&GridCoord::new(x, y)))
            .collect()
    }

    /// Every row of the bounding rectangle, north to south.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<&RegionId>>> + '_ {
        let ys = self.bounds.map_or(1..=0, |b| b.min_y..=b.max_y);
        ys.map(move |y| self.row(y))
    }

    /// Fraction of the bounding rectangle that is occupied.
    pub fn fill_ratio(&self) -> f64 {
        match self.bounds {
            Some(b) => self.len() as f64 / b.area() as f64,
            None => 0.0,
        }
    }
}
