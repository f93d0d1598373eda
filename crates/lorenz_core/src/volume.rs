//! Voxel visit-count accumulation
//!
//! States strictly inside the grid bounds are mapped to one of `R³` cells and
//! the cell's counter is incremented. Counters live in a single contiguous
//! buffer addressed as `ix + iy * R + iz * R²`.

use serde::{Serialize, Deserialize};
use lorenz_math::{Axis, Bounds3, ScalarField, UniformGrid, Vec3};

use crate::CoreError;

/// Largest iteration count for which no visit counter can overflow
pub const MAX_ITERATIONS: u64 = u32::MAX as u64;

/// Resolution and spatial extent of the voxel lattice
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Cells per axis (the same on all three axes)
    pub resolution: usize,
    /// Region covered by the lattice
    pub bounds: Bounds3,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            resolution: 200,
            bounds: Bounds3::from_ranges([-30.0, 30.0], [-30.0, 30.0], [-10.0, 60.0]),
        }
    }
}

impl GridSpec {
    /// Create a new grid spec
    pub fn new(resolution: usize, bounds: Bounds3) -> Self {
        Self { resolution, bounds }
    }

    /// Validate the spec and return the number of cells it needs
    pub fn validate(&self) -> Result<usize, CoreError> {
        if self.resolution == 0 {
            return Err(CoreError::ZeroResolution);
        }
        if let Some(axis) = self.bounds.invalid_axis() {
            let [min, max] = self.bounds.range(axis);
            return Err(CoreError::InvalidBounds { axis, min, max });
        }
        self.resolution
            .checked_mul(self.resolution)
            .and_then(|n| n.checked_mul(self.resolution))
            .ok_or(CoreError::VolumeTooLarge { resolution: self.resolution })
    }

    /// Number of cells, `resolution³` (only meaningful for a valid spec)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.resolution * self.resolution * self.resolution
    }

    /// Physical size of one voxel along each axis
    pub fn spacing(&self) -> Vec3 {
        let size = self.bounds.size();
        let r = self.resolution as f64;
        Vec3::new(size.x / r, size.y / r, size.z / r)
    }

    /// Regular grid placing voxel `(i, j, k)` at `min + (i, j, k) * spacing`
    pub fn grid(&self) -> UniformGrid {
        UniformGrid::new([self.resolution; 3], self.bounds.min, self.spacing())
    }

    /// Voxel coordinates of a point, or `None` unless it is strictly inside the bounds
    ///
    /// Every returned coordinate is below `resolution`: truncation can round a
    /// point just under `max` up to `resolution`, so the result is clamped.
    #[inline]
    pub fn voxel_coords(&self, point: Vec3) -> Option<[usize; 3]> {
        if !self.bounds.contains_strict(point) {
            return None;
        }
        let r = self.resolution as f64;
        let last = self.resolution - 1;
        let mut coords = [0usize; 3];
        for (slot, axis) in coords.iter_mut().zip(Axis::ALL) {
            let [lo, hi] = self.bounds.range(axis);
            let scaled = (axis.component(point) - lo) * r / (hi - lo);
            *slot = (scaled as usize).min(last);
        }
        Some(coords)
    }

    /// Linear voxel index of a point, always in `[0, resolution³)` when present
    #[inline]
    pub fn voxel_index(&self, point: Vec3) -> Option<usize> {
        self.voxel_coords(point)
            .map(|[ix, iy, iz]| self.linear_index(ix, iy, iz))
    }

    /// Linear index of voxel coordinates (x fastest, then y, then z)
    #[inline]
    pub fn linear_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        let r = self.resolution;
        ix + iy * r + iz * r * r
    }
}

/// Running totals of binned and dropped states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulationStats {
    /// States that landed in a voxel
    pub binned: u64,
    /// States on or outside the bounds
    pub dropped: u64,
}

impl AccumulationStats {
    /// Total states offered to the accumulator
    pub fn total(&self) -> u64 {
        self.binned + self.dropped
    }
}

/// Dense `R³` volume of visit counters
///
/// Allocated once and never resized.
#[derive(Clone, Debug)]
pub struct ScalarVolume {
    spec: GridSpec,
    counts: Vec<u32>,
    stats: AccumulationStats,
}

impl ScalarVolume {
    /// Allocate a zeroed volume for a validated spec
    ///
    /// Reports [`CoreError::Allocation`] instead of aborting when the buffer
    /// cannot be reserved.
    pub fn allocate(spec: GridSpec) -> Result<Self, CoreError> {
        let cells = spec.validate()?;
        let mut counts = Vec::new();
        counts
            .try_reserve_exact(cells)
            .map_err(|_| CoreError::Allocation { cells })?;
        counts.resize(cells, 0);

        log::debug!(
            "Allocated {}^3 volume ({} cells, {} bytes)",
            spec.resolution,
            cells,
            cells * std::mem::size_of::<u32>()
        );

        Ok(Self {
            spec,
            counts,
            stats: AccumulationStats::default(),
        })
    }

    /// Reject iteration counts that could overflow a single counter
    pub fn check_capacity(iterations: u64) -> Result<(), CoreError> {
        if iterations > MAX_ITERATIONS {
            return Err(CoreError::CounterOverflow { iterations });
        }
        Ok(())
    }

    /// Bin one state. Returns `true` if a counter was incremented.
    ///
    /// Counters saturate at `u32::MAX`; runs validated with
    /// [`ScalarVolume::check_capacity`] never reach it.
    #[inline]
    pub fn bin(&mut self, point: Vec3) -> bool {
        match self.spec.voxel_index(point) {
            Some(index) => {
                let cell = &mut self.counts[index];
                *cell = cell.saturating_add(1);
                self.stats.binned += 1;
                true
            }
            None => {
                self.stats.dropped += 1;
                false
            }
        }
    }

    /// Bin every state of an iterator
    pub fn accumulate<I: IntoIterator<Item = Vec3>>(&mut self, points: I) {
        for p in points {
            self.bin(p);
        }
    }

    /// Elementwise-add another volume built on the same grid
    pub fn merge(&mut self, other: &ScalarVolume) -> Result<(), CoreError> {
        if self.spec != other.spec {
            return Err(CoreError::GridMismatch);
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a = a.saturating_add(*b);
        }
        self.stats.binned += other.stats.binned;
        self.stats.dropped += other.stats.dropped;
        Ok(())
    }

    /// Grid spec this volume was allocated for
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Binned/dropped totals so far
    pub fn stats(&self) -> AccumulationStats {
        self.stats
    }

    /// Raw counters in linear-index order
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Counter of voxel `(ix, iy, iz)`
    ///
    /// # Panics
    /// If any coordinate is not below the resolution.
    #[inline]
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> u32 {
        let r = self.spec.resolution;
        assert!(ix < r && iy < r && iz < r, "voxel ({}, {}, {}) outside {}^3 grid", ix, iy, iz, r);
        self.counts[self.spec.linear_index(ix, iy, iz)]
    }

    /// Sum of all counters
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Largest counter
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of voxels visited at least once
    pub fn nonzero_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Physical voxel size
    pub fn spacing(&self) -> Vec3 {
        self.spec.spacing()
    }

    /// World position of voxel (0, 0, 0)
    pub fn origin(&self) -> Vec3 {
        self.spec.bounds.min
    }
}

impl ScalarField for ScalarVolume {
    fn grid(&self) -> UniformGrid {
        self.spec.grid()
    }

    #[inline]
    fn value(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        self.counts[self.spec.linear_index(ix, iy, iz)] as f64
    }
}
