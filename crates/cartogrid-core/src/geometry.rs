//! 2D vector math for centroid distances and orientation scoring.

use std::ops::{Add, Sub};

use crate::coord::GridCoord;

/// A 2D vector of `f64` components.
///
/// Used both for geographic centroids (`x` = longitude, `y` = latitude)
/// and for grid-space displacement vectors.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component (longitude for centroids).
    pub x: f64,
    /// Vertical component (latitude for centroids).
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Construct a vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).norm()
    }

    /// Whether both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Cosine of the angle between `self` and `other`.
    ///
    /// Returns `None` when either vector has zero length, where the angle
    /// is undefined. The result is clamped to `[-1, 1]` to absorb rounding.
    pub fn cosine(self, other: Vec2) -> Option<f64> {
        let denom = self.norm() * other.norm();
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }
        Some((self.dot(other) / denom).clamp(-1.0, 1.0))
    }

    /// Displacement from grid cell `from` to grid cell `to`, with the
    /// vertical axis flipped so that positive `y` points north.
    pub fn grid_displacement(from: GridCoord, to: GridCoord) -> Self {
        Self::new(f64::from(to.x) - f64::from(from.x), f64::from(from.y) - f64::from(to.y))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Map a cosine to an orientation cost in `[0, 1]`.
///
/// 0 means the vectors point the same way, 0.5 perpendicular,
/// 1 opposite.
pub fn orientation_cost(cosine: f64) -> f64 {
    (1.0 - cosine) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert!((a.distance(b) - 5.0).abs() < EPS);
        assert!((b.distance(a) - 5.0).abs() < EPS);
    }

    #[test]
    fn subtraction_is_componentwise() {
        assert_eq!(Vec2::new(3.0, -1.0) - Vec2::new(1.0, 2.0), Vec2::new(2.0, -3.0));
    }

    #[test]
    fn cost_parallel_is_zero() {
        let c = Vec2::new(2.0, 1.0).cosine(Vec2::new(4.0, 2.0)).unwrap();
        assert!(orientation_cost(c).abs() < EPS);
    }

    #[test]
    fn cost_antiparallel_is_one() {
        let c = Vec2::new(2.0, 1.0).cosine(Vec2::new(-4.0, -2.0)).unwrap();
        assert!((orientation_cost(c) - 1.0).abs() < EPS);
    }

    #[test]
    fn cost_perpendicular_is_half() {
        let c = Vec2::new(1.0, 0.0).cosine(Vec2::new(0.0, 3.0)).unwrap();
        assert!((orientation_cost(c) - 0.5).abs() < EPS);
    }

    #[test]
    fn cosine_of_zero_vector_is_undefined() {
        assert!(Vec2::ZERO.cosine(Vec2::new(1.0, 0.0)).is_none());
        assert!(Vec2::new(1.0, 0.0).cosine(Vec2::ZERO).is_none());
    }

    #[test]
    fn grid_displacement_points_north_for_smaller_rows() {
        let v = Vec2::grid_displacement(GridCoord::new(0, 0), GridCoord::new(0, -1));
        assert_eq!(v, Vec2::new(0.0, 1.0));
        let v = Vec2::grid_displacement(GridCoord::new(0, 0), GridCoord::new(2, 0));
        assert_eq!(v, Vec2::new(2.0, 0.0));
    }

    proptest! {
        #[test]
        fn cost_stays_in_unit_interval(
            ax in -1e3f64..1e3, ay in -1e3f64..1e3,
            bx in -1e3f64..1e3, by in -1e3f64..1e3,
        ) {
            if let Some(c) = Vec2::new(ax, ay).cosine(Vec2::new(bx, by)) {
                let cost = orientation_cost(c);
                prop_assert!((0.0..=1.0).contains(&cost));
            }
        }
    }
}
