//! Axis-aligned bounds in 3D
//!
//! The region of interest for a run: trajectories are seeded inside it and
//! only states strictly inside it are binned into the voxel grid.

use serde::{Serialize, Deserialize};
use crate::Vec3;

/// One of the three coordinate axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in x, y, z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lower-case axis name
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn component(self, v: Vec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A 3D axis-aligned box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Bounds3 {
    /// Create new bounds from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create bounds from `[min, max]` ranges per axis
    pub fn from_ranges(x: [f64; 2], y: [f64; 2], z: [f64; 2]) -> Self {
        Self {
            min: Vec3::new(x[0], y[0], z[0]),
            max: Vec3::new(x[1], y[1], z[1]),
        }
    }

    /// Create a cube spanning `[min, max]` on every axis
    pub fn cube(min: f64, max: f64) -> Self {
        Self::from_ranges([min, max], [min, max], [min, max])
    }

    /// `[min, max]` along one axis
    #[inline]
    pub fn range(&self, axis: Axis) -> [f64; 2] {
        [axis.component(self.min), axis.component(self.max)]
    }

    /// Full size in each dimension
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True if every axis has finite endpoints, `min < max` and a finite span
    pub fn is_valid(&self) -> bool {
        self.invalid_axis().is_none()
    }

    /// First axis whose range is empty, inverted, non-finite or too wide to measure
    pub fn invalid_axis(&self) -> Option<Axis> {
        Axis::ALL.into_iter().find(|&axis| {
            let [lo, hi] = self.range(axis);
            !(lo.is_finite() && hi.is_finite() && lo < hi && (hi - lo).is_finite())
        })
    }

    /// Strict containment: `min < p < max` on every axis.
    ///
    /// Points on a face are outside. NaN components are outside.
    #[inline]
    pub fn contains_strict(&self, p: Vec3) -> bool {
        p.x > self.min.x
            && p.x < self.max.x
            && p.y > self.min.y
            && p.y < self.max.y
            && p.z > self.min.z
            && p.z < self.max.z
    }

    /// Inclusive containment: `min <= p <= max` on every axis
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator
    pub fn enclosing<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| {
            Self::new(b.min.min_components(p), b.max.max_components(p))
        }))
    }
}
