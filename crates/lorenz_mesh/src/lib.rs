//! Iso-Surface Extraction Library
//!
//! This crate turns a regular scalar volume into a triangle mesh where the
//! field crosses a threshold.
//!
//! ## Key Components
//!
//! - [`IsoSurfaceExtractor`] - Marching tetrahedra over any [`ScalarField`]
//! - [`IsoMesh`] - Indexed triangle mesh with OBJ/RON export
//! - [`MeshVertex`] - Pod vertex (position + normal) for GPU upload
//! - [`lookup_tables`] - Compile-time case tables for the tetrahedral split

pub mod lookup_tables;
pub mod types;
pub mod extractor;
pub mod mesh;

pub use lookup_tables::{
    CUBE_CORNERS, CUBE_TETRAHEDRA, TETRA_EDGES, TETRA_EDGE_TABLE, TETRA_TRI_TABLE, TETRA_TRI_COUNT,
};
pub use types::{MeshVertex, TRIANGLE_INDEX_COUNT};
pub use extractor::{extract, ExtractorConfig, IsoSurfaceExtractor};
pub use mesh::{IsoMesh, MeshSaveError};

// Re-export the field contract for convenience
pub use lorenz_math::{ScalarField, UniformGrid};
