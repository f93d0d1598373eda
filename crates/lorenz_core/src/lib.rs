//! Core types for the Lorenz iso-surface pipeline
//!
//! This crate provides the two compute stages that run before contouring:
//!
//! - [`LorenzParams`] - The Prandtl, Rayleigh and geometric coefficients
//! - [`LorenzSystem`] - Fixed-step explicit Euler integrator
//! - [`Trajectory`] - Iterator over successive integrated states
//! - [`GridSpec`] - Resolution and bounds of the voxel lattice
//! - [`ScalarVolume`] - Dense visit-count volume filled by binning states
//! - [`CoreError`] - Validation failures reported before a run starts

mod error;
mod system;
mod volume;

pub use error::CoreError;
pub use system::{euler_step, random_start, LorenzParams, LorenzSystem, Trajectory};
pub use volume::{AccumulationStats, GridSpec, ScalarVolume, MAX_ITERATIONS};

// Re-export the math types used throughout the public API
pub use lorenz_math::{Axis, Bounds3, ScalarField, UniformGrid, Vec3};
