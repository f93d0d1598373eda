//! Iso-surface pipeline
//!
//! Runs the three stages in order:
//! 1. Validate the parameters and allocate the volume (fails before any work)
//! 2. Integrate the trajectory, binning every state as it is produced
//! 3. Contour the finished volume at the threshold
//!
//! The whole run is synchronous and single-threaded. The volume is dropped
//! once the mesh has been extracted; the mesh is handed to the caller.

use rand::rngs::StdRng;
use rand::SeedableRng;

use lorenz_core::{
    random_start, AccumulationStats, Axis, CoreError, GridSpec, LorenzParams, LorenzSystem,
    ScalarVolume, Vec3,
};
use lorenz_mesh::{ExtractorConfig, IsoMesh, IsoSurfaceExtractor};

/// How the initial state is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartState {
    /// Uniformly random inside the grid bounds; seeded runs are reproducible
    Random { seed: Option<u64> },
    /// A fixed point in phase space (may lie outside the bounds)
    Fixed(Vec3),
}

impl Default for StartState {
    fn default() -> Self {
        StartState::Random { seed: None }
    }
}

/// Everything one run needs
#[derive(Debug, Clone, PartialEq)]
pub struct IsoSurfaceParams {
    /// Lorenz coefficients
    pub lorenz: LorenzParams,
    /// Euler step size
    pub step_size: f64,
    /// Number of integration steps
    pub iterations: u64,
    /// Initial state
    pub start: StartState,
    /// Voxel grid
    pub grid: GridSpec,
    /// Extraction threshold and normals
    pub contour: ExtractorConfig,
}

impl Default for IsoSurfaceParams {
    fn default() -> Self {
        Self {
            lorenz: LorenzParams::default(),
            step_size: 0.01,
            iterations: 10_000_000,
            start: StartState::default(),
            grid: GridSpec::default(),
            contour: ExtractorConfig::default(),
        }
    }
}

impl IsoSurfaceParams {
    /// Check every parameter and build the integrator
    pub fn validate(&self) -> Result<LorenzSystem, CoreError> {
        let system = LorenzSystem::new(self.lorenz, self.step_size)?;
        self.grid.validate()?;
        ScalarVolume::check_capacity(self.iterations)?;
        if let StartState::Fixed(p) = self.start {
            if !p.is_finite() {
                return Err(CoreError::NonFiniteParameter("start"));
            }
        }
        if !self.contour.threshold.is_finite() {
            return Err(CoreError::NonFiniteParameter("threshold"));
        }
        Ok(system)
    }

    /// Pick the initial state. Bounds must already be validated.
    pub fn resolve_start(&self) -> Vec3 {
        match self.start {
            StartState::Fixed(p) => p,
            StartState::Random { seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                random_start(&self.grid.bounds, &mut rng)
            }
        }
    }

    fn log_summary(&self) {
        log::info!("The Lorenz Attractor");
        log::info!("  Pr = {}", self.lorenz.prandtl);
        log::info!("  b = {}", self.lorenz.beta);
        log::info!("  r = {}", self.lorenz.rayleigh);
        log::info!("  integration step size = {}", self.step_size);
        log::info!("  slice resolution = {}", self.grid.resolution);
        log::info!("  # of iterations = {}", self.iterations);
        log::info!("  specified range:");
        for axis in Axis::ALL {
            let [lo, hi] = self.grid.bounds.range(axis);
            log::info!("      {}: {}, {}", axis, lo, hi);
        }
    }
}

/// Result of a run
#[derive(Debug, Clone)]
pub struct IsoSurface {
    /// Extracted geometry, owned by the caller
    pub mesh: IsoMesh,
    /// Binned/dropped state counts
    pub stats: AccumulationStats,
    /// State the integration started from
    pub start: Vec3,
    /// Highest visit count of any voxel
    pub max_count: u32,
}

/// Integrate `iterations` steps from `start`, binning each state into a fresh volume
pub fn accumulate(
    system: &LorenzSystem,
    grid: GridSpec,
    start: Vec3,
    iterations: u64,
) -> Result<ScalarVolume, CoreError> {
    let mut volume = ScalarVolume::allocate(grid)?;
    let report_every = (iterations / 10).max(1);

    for (i, state) in (1..=iterations).zip(system.trajectory(start)) {
        volume.bin(state);
        if i % report_every == 0 {
            log::debug!("  integrated {}/{} steps", i, iterations);
        }
    }

    Ok(volume)
}

/// Contour a finished volume
pub fn extract(volume: &ScalarVolume, contour: ExtractorConfig) -> IsoMesh {
    IsoSurfaceExtractor::new(contour).extract(volume)
}

/// Run the full pipeline: parameters -> trajectory -> volume -> mesh
pub fn build_iso_surface(params: &IsoSurfaceParams) -> Result<IsoSurface, CoreError> {
    let system = params.validate()?;
    params.log_summary();

    let start = params.resolve_start();
    log::info!("  starting at {}, {}, {}", start.x, start.y, start.z);
    if !params.grid.bounds.contains(start) {
        log::warn!("Start lies outside the grid bounds; states are dropped until it enters them");
    }
    for p in system.fixed_points() {
        log::debug!("  fixed point {}, {}, {}", p.x, p.y, p.z);
    }

    let volume = accumulate(&system, params.grid, start, params.iterations)?;
    let stats = volume.stats();
    let max_count = volume.max_count();
    log::info!(
        "  binned {} states ({} dropped), {} voxels visited, peak count {}",
        stats.binned,
        stats.dropped,
        volume.nonzero_cells(),
        max_count
    );

    log::info!("  contouring...");
    let mesh = extract(&volume, params.contour);
    if mesh.is_empty() {
        log::warn!(
            "No voxel reached threshold {} (peak count {}); surface is empty",
            params.contour.threshold,
            max_count
        );
    } else {
        log::info!(
            "  extracted {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    }

    Ok(IsoSurface {
        mesh,
        stats,
        start,
        max_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorenz_core::Bounds3;

    fn small_params() -> IsoSurfaceParams {
        IsoSurfaceParams {
            iterations: 50_000,
            start: StartState::Random { seed: Some(1) },
            grid: GridSpec::new(24, GridSpec::default().bounds),
            contour: ExtractorConfig {
                threshold: 10.0,
                compute_normals: false,
            },
            ..IsoSurfaceParams::default()
        }
    }

    #[test]
    fn test_default_params() {
        let params = IsoSurfaceParams::default();
        assert_eq!(params.lorenz, LorenzParams::new(10.0, 28.0, 2.667));
        assert_eq!(params.step_size, 0.01);
        assert_eq!(params.iterations, 10_000_000);
        assert_eq!(params.grid.resolution, 200);
        assert_eq!(params.contour.threshold, 50.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_grid_before_running() {
        let params = IsoSurfaceParams {
            grid: GridSpec::new(0, Bounds3::cube(0.0, 1.0)),
            ..small_params()
        };
        assert_eq!(build_iso_surface(&params).unwrap_err(), CoreError::ZeroResolution);
    }

    #[test]
    fn test_validate_rejects_too_many_iterations() {
        let params = IsoSurfaceParams {
            iterations: u32::MAX as u64 + 1,
            ..small_params()
        };
        assert!(matches!(params.validate(), Err(CoreError::CounterOverflow { .. })));
    }

    #[test]
    fn test_validate_rejects_non_finite_start_and_threshold() {
        let params = IsoSurfaceParams {
            start: StartState::Fixed(Vec3::new(f64::NAN, 0.0, 0.0)),
            ..small_params()
        };
        assert!(matches!(params.validate(), Err(CoreError::NonFiniteParameter("start"))));

        let mut params = small_params();
        params.contour.threshold = f64::INFINITY;
        assert!(matches!(params.validate(), Err(CoreError::NonFiniteParameter("threshold"))));
    }

    #[test]
    fn test_seeded_start_is_reproducible_and_in_bounds() {
        let params = small_params();
        let a = params.resolve_start();
        let b = params.resolve_start();
        assert_eq!(a, b);
        assert!(params.grid.bounds.contains(a));
    }

    #[test]
    fn test_fixed_start_is_used_verbatim() {
        let params = IsoSurfaceParams {
            start: StartState::Fixed(Vec3::new(100.0, 0.0, 0.0)),
            ..small_params()
        };
        assert_eq!(params.resolve_start(), Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_accumulate_conserves_counts() {
        let params = small_params();
        let system = params.validate().unwrap();
        let volume = accumulate(&system, params.grid, Vec3::ONE, 12_345).unwrap();
        assert_eq!(volume.stats().total(), 12_345);
        assert_eq!(volume.total(), volume.stats().binned);
    }

    #[test]
    fn test_build_small_surface() {
        let surface = build_iso_surface(&small_params()).unwrap();
        assert_eq!(surface.stats.total(), 50_000);
        assert!(surface.max_count >= 10);
        assert!(!surface.mesh.is_empty());
    }
}
