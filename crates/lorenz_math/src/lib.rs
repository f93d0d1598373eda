//! 3D Mathematics Library
//!
//! This crate provides the small set of geometric types shared by the
//! integrator, the voxel accumulator and the iso-surface extractor.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector / phase-space state with x, y, z components
//! - [`Bounds3`] - Axis-aligned box used to seed and gate trajectories
//! - [`UniformGrid`] - Dimensions, origin and spacing of a regular lattice
//!
//! ## Field Types
//!
//! - [`ScalarField`] - Trait for regular scalar fields that can be contoured

mod vec3;
pub mod bounds;
pub mod field;

pub use vec3::Vec3;
pub use bounds::{Axis, Bounds3};
pub use field::{ScalarField, UniformGrid};
