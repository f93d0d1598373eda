//! Regular scalar fields
//!
//! A scalar field stores one value per lattice point of a [`UniformGrid`].
//! The grid places point `(i, j, k)` at `origin + (i, j, k) * spacing`.

use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Geometry of a regular 3D lattice
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniformGrid {
    /// Number of lattice points along x, y, z
    pub dimensions: [usize; 3],
    /// World position of point (0, 0, 0)
    pub origin: Vec3,
    /// Distance between neighbouring points along each axis
    pub spacing: Vec3,
}

impl UniformGrid {
    /// Create a new grid description
    pub fn new(dimensions: [usize; 3], origin: Vec3, spacing: Vec3) -> Self {
        Self { dimensions, origin, spacing }
    }

    /// Total number of lattice points
    #[inline]
    pub fn point_count(&self) -> usize {
        self.dimensions[0] * self.dimensions[1] * self.dimensions[2]
    }

    /// Number of cells (cubes of 8 neighbouring points); zero if any axis has fewer than 2 points
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.dimensions
            .iter()
            .map(|&d| d.saturating_sub(1))
            .product()
    }

    /// Linear index with x varying fastest, then y, then z
    #[inline]
    pub fn linear_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + iy * self.dimensions[0] + iz * self.dimensions[0] * self.dimensions[1]
    }

    /// World position of a lattice point
    #[inline]
    pub fn point_position(&self, ix: usize, iy: usize, iz: usize) -> Vec3 {
        self.origin
            + Vec3::new(ix as f64, iy as f64, iz as f64).component_mul(self.spacing)
    }
}

/// A scalar value sampled at every point of a regular grid
///
/// This is the input contract of the iso-surface extractor: anything that can
/// describe its lattice and answer point queries can be contoured.
pub trait ScalarField {
    /// Lattice geometry of this field
    fn grid(&self) -> UniformGrid;

    /// Value at a lattice point. Indices are always within `grid().dimensions`.
    fn value(&self, ix: usize, iy: usize, iz: usize) -> f64;

    /// Gradient at a lattice point in world units.
    ///
    /// Central differences in the interior, one-sided differences on the faces.
    fn gradient(&self, ix: usize, iy: usize, iz: usize) -> Vec3 {
        let grid = self.grid();
        let idx = [ix, iy, iz];
        let spacing = grid.spacing.to_array();
        let mut g = [0.0; 3];

        for axis in 0..3 {
            let n = grid.dimensions[axis];
            if n < 2 {
                continue;
            }
            let i = idx[axis];
            let lo = i.saturating_sub(1);
            let hi = (i + 1).min(n - 1);

            let mut at_lo = idx;
            at_lo[axis] = lo;
            let mut at_hi = idx;
            at_hi[axis] = hi;

            let dv = self.value(at_hi[0], at_hi[1], at_hi[2])
                - self.value(at_lo[0], at_lo[1], at_lo[2]);
            g[axis] = dv / ((hi - lo) as f64 * spacing[axis]);
        }

        Vec3::from_array(g)
    }
}
