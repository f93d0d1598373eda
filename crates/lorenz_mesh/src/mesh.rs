//! Extracted surface geometry
//!
//! An indexed triangle list ready to hand to a renderer, plus export to
//! Wavefront OBJ (for external viewers) and RON (serde round-trips).

use serde::{Serialize, Deserialize};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use lorenz_math::{Bounds3, Vec3};
use crate::types::{MeshVertex, TRIANGLE_INDEX_COUNT};

/// Indexed triangle mesh produced by the extractor
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoMesh {
    /// Vertices, each shared by every triangle touching it
    pub vertices: Vec<MeshVertex>,
    /// Triangle list, three vertex indices per triangle
    pub indices: Vec<u32>,
    /// Whether vertex normals were computed
    #[serde(default)]
    pub has_normals: bool,
}

impl IsoMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, vertex: MeshVertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Append a triangle of existing vertex indices
    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        debug_assert!(triangle.iter().all(|&i| (i as usize) < self.vertices.len()));
        self.indices.extend_from_slice(&triangle);
    }

    /// Get the number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / TRIANGLE_INDEX_COUNT
    }

    /// True if the mesh has no triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(TRIANGLE_INDEX_COUNT)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Bounding box of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::enclosing(self.vertices.iter().map(|v| {
            let [x, y, z] = v.position;
            Vec3::new(x as f64, y as f64, z as f64)
        }))
    }

    /// Write the mesh as Wavefront OBJ
    pub fn write_obj<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "# Lorenz attractor iso-surface")?;
        writeln!(out, "# {} vertices, {} triangles", self.vertex_count(), self.triangle_count())?;

        for v in &self.vertices {
            let [x, y, z] = v.position;
            writeln!(out, "v {} {} {}", x, y, z)?;
        }

        if self.has_normals {
            for v in &self.vertices {
                let [x, y, z] = v.normal;
                writeln!(out, "vn {} {} {}", x, y, z)?;
            }
        }

        // OBJ indices are 1-based
        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a + 1, b + 1, c + 1);
            if self.has_normals {
                writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
            } else {
                writeln!(out, "f {} {} {}", a, b, c)?;
            }
        }

        out.flush()
    }

    /// Save the mesh to an OBJ file
    pub fn save_obj<P: AsRef<Path>>(&self, path: P) -> Result<(), MeshSaveError> {
        let file = fs::File::create(path)?;
        self.write_obj(BufWriter::new(file))?;
        Ok(())
    }

    /// Save the mesh to a RON file
    pub fn save_ron<P: AsRef<Path>>(&self, path: P) -> Result<(), MeshSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Error saving a mesh
#[derive(Debug)]
pub enum MeshSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for MeshSaveError {
    fn from(e: io::Error) -> Self {
        MeshSaveError::Io(e)
    }
}

impl From<ron::Error> for MeshSaveError {
    fn from(e: ron::Error) -> Self {
        MeshSaveError::Serialize(e)
    }
}

impl std::fmt::Display for MeshSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshSaveError::Io(e) => write!(f, "IO error: {}", e),
            MeshSaveError::Serialize(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for MeshSaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshSaveError::Io(e) => Some(e),
            MeshSaveError::Serialize(e) => Some(e),
        }
    }
}
