//! Vertex types for the extracted surface
//!
//! Layout is `#[repr(C)]` and Pod so a renderer can upload the vertex
//! buffer as raw bytes.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// A vertex on the iso-surface
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MeshVertex {
    /// Position in world space (x, y, z)
    pub position: [f32; 3],
    /// Unit surface normal pointing toward lower field values, or zero when
    /// normals were not computed
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Create a vertex without a normal
    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0; 3],
        }
    }
}

/// Size of a single triangle in index units (3 indices)
pub const TRIANGLE_INDEX_COUNT: usize = 3;
