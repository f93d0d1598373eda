//! Lorenz iso-surface library
//!
//! Integrates the Lorenz system, bins the trajectory into a visit-count
//! volume and contours that volume into a triangle mesh.
//!
//! - [`config`] - Layered TOML/environment configuration
//! - [`pipeline`] - The end-to-end run from parameters to mesh

pub mod config;
pub mod pipeline;

pub use pipeline::{build_iso_surface, IsoSurface, IsoSurfaceParams, StartState};
