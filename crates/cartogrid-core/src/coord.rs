//! Integer grid coordinates and bounding rectangles.

use std::fmt;

/// All 8 offsets around a cell, column-major: west column, centre column
/// (N, S), east column.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell on the output grid.
///
/// `x` grows eastward and `y` grows southward, so the first output row
/// (smallest `y`) is the northernmost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// Column.
    pub x: i32,
    /// Row; larger is further south.
    pub y: i32,
}

impl GridCoord {
    /// The cell every layout starts from.
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0 };

    /// Construct a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 8-connected neighbourhood of this cell, in a fixed order.
    pub fn neighbours(self) -> [GridCoord; 8] {
        OFFSETS_8.map(|(dx, dy)| GridCoord::new(self.x + dx, self.y + dy))
    }

    /// Chebyshev (L-inf) distance, the 8-connected graph distance.
    pub fn chebyshev(self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Whether `other` is one of the 8 cells around `self`.
    pub fn is_adjacent(self, other: GridCoord) -> bool {
        self.chebyshev(other) == 1
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Inclusive bounding rectangle of occupied grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridBounds {
    /// Smallest occupied column.
    pub min_x: i32,
    /// Largest occupied column.
    pub max_x: i32,
    /// Smallest occupied row (northernmost).
    pub min_y: i32,
    /// Largest occupied row (southernmost).
    pub max_y: i32,
}

impl GridBounds {
    /// Bounds of a single cell.
    pub fn of(coord: GridCoord) -> Self {
        Self {
            min_x: coord.x,
            max_x: coord.x,
            min_y: coord.y,
            max_y: coord.y,
        }
    }

    /// Bounds of a set of cells, or `None` if the set is empty.
    pub fn from_coords<I: IntoIterator<Item = GridCoord>>(coords: I) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::of(first);
        for c in iter {
            bounds.include(c);
        }
        Some(bounds)
    }

    /// Grow the rectangle to cover `coord`.
    pub fn include(&mut self, coord: GridCoord) {
        self.min_x = self.min_x.min(coord.x);
        self.max_x = self.max_x.max(coord.x);
        self.min_y = self.min_y.min(coord.y);
        self.max_y = self.max_y.max(coord.y);
    }

    /// Number of columns spanned.
    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x) + 1
    }

    /// Number of rows spanned.
    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y) + 1
    }

    /// Total cells in the rectangle, occupied or not.
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Whether `coord` lies inside the rectangle.
    pub fn contains(&self, coord: GridCoord) -> bool {
        (self.min_x..=self.max_x).contains(&coord.x) && (self.min_y..=self.max_y).contains(&coord.y)
    }
}
