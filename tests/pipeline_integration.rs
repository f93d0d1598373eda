//! Integration tests for the end-to-end pipeline
//!
//! Runs small attractor volumes through validation, integration, binning and
//! contouring, and checks that bad parameters fail before any work is done.

use lorenz_core::{Axis, Bounds3, CoreError, GridSpec, Vec3};
use lorenz_iso::pipeline::accumulate;
use lorenz_iso::{build_iso_surface, IsoSurfaceParams, StartState};
use lorenz_mesh::ExtractorConfig;

fn small_run(seed: u64) -> IsoSurfaceParams {
    IsoSurfaceParams {
        iterations: 100_000,
        start: StartState::Random { seed: Some(seed) },
        grid: GridSpec::new(32, GridSpec::default().bounds),
        contour: ExtractorConfig {
            threshold: 15.0,
            compute_normals: true,
        },
        ..IsoSurfaceParams::default()
    }
}

// ==================== Full Run Tests ====================

#[test]
fn test_small_run_produces_mesh_inside_bounds() {
    let params = small_run(7);
    let surface = build_iso_surface(&params).unwrap();

    assert_eq!(surface.stats.total(), params.iterations);
    assert!(params.grid.bounds.contains(surface.start));
    assert!(!surface.mesh.is_empty());
    assert!(surface.mesh.has_normals);

    let b = surface.mesh.bounds().unwrap();
    assert!(params.grid.bounds.contains(b.min));
    assert!(params.grid.bounds.contains(b.max));
    for [a, b, c] in surface.mesh.triangles() {
        let n = surface.mesh.vertex_count() as u32;
        assert!(a < n && b < n && c < n);
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let a = build_iso_surface(&small_run(11)).unwrap();
    let b = build_iso_surface(&small_run(11)).unwrap();
    assert_eq!(a.start, b.start);
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.max_count, b.max_count);
    assert_eq!(a.mesh, b.mesh);
}

#[test]
fn test_volume_conserves_binned_states() {
    let params = small_run(5);
    let system = params.validate().unwrap();
    let start = params.resolve_start();
    let volume = accumulate(&system, params.grid, start, params.iterations).unwrap();

    let stats = volume.stats();
    assert_eq!(stats.total(), params.iterations);
    assert_eq!(volume.total(), stats.binned);
    assert!(stats.binned > stats.dropped);
}

#[test]
fn test_fixed_start_outside_bounds_still_runs() {
    let params = IsoSurfaceParams {
        iterations: 20_000,
        start: StartState::Fixed(Vec3::new(0.0, 0.0, 200.0)),
        ..small_run(0)
    };
    let surface = build_iso_surface(&params).unwrap();
    assert_eq!(surface.start, Vec3::new(0.0, 0.0, 200.0));
    assert_eq!(surface.stats.total(), 20_000);
    assert!(surface.stats.dropped > 0);
}

#[test]
fn test_high_threshold_gives_empty_mesh() {
    let params = IsoSurfaceParams {
        iterations: 1_000,
        contour: ExtractorConfig {
            threshold: 1e9,
            compute_normals: false,
        },
        ..small_run(2)
    };
    let surface = build_iso_surface(&params).unwrap();
    assert!(surface.mesh.is_empty());
    assert_eq!(surface.stats.total(), 1_000);
}

// ==================== Validation Tests ====================

#[test]
fn test_zero_resolution_rejected() {
    let params = IsoSurfaceParams {
        grid: GridSpec::new(0, GridSpec::default().bounds),
        ..small_run(1)
    };
    assert_eq!(build_iso_surface(&params).unwrap_err(), CoreError::ZeroResolution);
}

#[test]
fn test_inverted_bounds_rejected() {
    let params = IsoSurfaceParams {
        grid: GridSpec::new(16, Bounds3::from_ranges([-1.0, 1.0], [2.0, -2.0], [0.0, 1.0])),
        ..small_run(1)
    };
    assert!(matches!(
        build_iso_surface(&params),
        Err(CoreError::InvalidBounds { .. })
    ));
}

#[test]
fn test_unmeasurably_wide_bounds_rejected() {
    // Finite endpoints whose span overflows to infinity
    let params = IsoSurfaceParams {
        grid: GridSpec::new(4, Bounds3::from_ranges([-1e308, 1e308], [-1.0, 1.0], [-1.0, 1.0])),
        ..small_run(1)
    };
    assert!(matches!(
        params.validate(),
        Err(CoreError::InvalidBounds { axis: Axis::X, .. })
    ));
    assert!(matches!(
        build_iso_surface(&params),
        Err(CoreError::InvalidBounds { axis: Axis::X, .. })
    ));
}

#[test]
fn test_bad_step_size_rejected() {
    for step_size in [0.0, -0.01, f64::NAN] {
        let params = IsoSurfaceParams {
            step_size,
            ..small_run(1)
        };
        assert!(matches!(
            build_iso_surface(&params),
            Err(CoreError::InvalidStepSize(_))
        ));
    }
}

#[test]
fn test_counter_overflow_rejected() {
    let params = IsoSurfaceParams {
        iterations: u64::MAX,
        ..small_run(1)
    };
    assert!(matches!(
        build_iso_surface(&params),
        Err(CoreError::CounterOverflow { .. })
    ));
}
