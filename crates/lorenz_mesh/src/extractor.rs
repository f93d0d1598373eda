//! Iso-surface extraction
//!
//! Marching tetrahedra over a regular [`ScalarField`]. A lattice point is
//! "above" when its value is `>= threshold`. Crossing points are placed by
//! linear interpolation along tetrahedron edges and shared between all
//! triangles that touch the same grid edge.

use std::collections::HashMap;

use serde::{Serialize, Deserialize};
use lorenz_math::{ScalarField, UniformGrid, Vec3};

use crate::lookup_tables::{
    CUBE_CORNERS, CUBE_TETRAHEDRA, TETRA_EDGES, TETRA_EDGE_TABLE, TETRA_TRI_COUNT, TETRA_TRI_TABLE,
};
use crate::mesh::IsoMesh;
use crate::types::MeshVertex;

/// Configuration for one extraction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Field value of the extracted level set
    pub threshold: f64,
    /// Compute per-vertex normals from the field gradient
    pub compute_normals: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            compute_normals: true,
        }
    }
}

/// Extracts a triangle mesh where a scalar field crosses a threshold
#[derive(Clone, Debug, Default)]
pub struct IsoSurfaceExtractor {
    config: ExtractorConfig,
}

impl IsoSurfaceExtractor {
    /// Create an extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an extractor for `threshold` with normals enabled
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(ExtractorConfig {
            threshold,
            ..ExtractorConfig::default()
        })
    }

    /// The extraction settings
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Contour `field` at the configured threshold
    ///
    /// Returns an empty mesh when nothing crosses the threshold or the grid
    /// has fewer than two points along some axis.
    pub fn extract<F: ScalarField + ?Sized>(&self, field: &F) -> IsoMesh {
        let grid = field.grid();
        let [nx, ny, nz] = grid.dimensions;

        let mut builder = MeshBuilder {
            field,
            grid,
            config: self.config,
            mesh: IsoMesh::new(),
            edge_vertices: HashMap::new(),
        };
        builder.mesh.has_normals = self.config.compute_normals;

        if nx < 2 || ny < 2 || nz < 2 {
            return builder.mesh;
        }

        let mut active_cells = 0usize;
        for iz in 0..nz - 1 {
            for iy in 0..ny - 1 {
                for ix in 0..nx - 1 {
                    if builder.march_cube([ix, iy, iz]) {
                        active_cells += 1;
                    }
                }
            }
        }

        log::debug!(
            "Contoured {} of {} cells ({} points) at {}: {} vertices, {} triangles",
            active_cells,
            grid.cell_count(),
            grid.point_count(),
            self.config.threshold,
            builder.mesh.vertex_count(),
            builder.mesh.triangle_count()
        );

        builder.mesh
    }
}

/// Contour `field` at `threshold` with default settings
pub fn extract<F: ScalarField + ?Sized>(field: &F, threshold: f64) -> IsoMesh {
    IsoSurfaceExtractor::with_threshold(threshold).extract(field)
}

/// Working state for one extraction
struct MeshBuilder<'a, F: ScalarField + ?Sized> {
    field: &'a F,
    grid: UniformGrid,
    config: ExtractorConfig,
    mesh: IsoMesh,
    /// Vertex index by grid edge (ordered pair of linear point indices)
    edge_vertices: HashMap<(usize, usize), u32>,
}

impl<F: ScalarField + ?Sized> MeshBuilder<'_, F> {
    /// Emit the triangles of one cube. Returns `false` if it is entirely above or below.
    fn march_cube(&mut self, base: [usize; 3]) -> bool {
        let mut corners = [[0usize; 3]; 8];
        let mut values = [0.0f64; 8];
        let mut above_mask = 0u8;

        for (c, offset) in CUBE_CORNERS.iter().enumerate() {
            let p = [base[0] + offset[0], base[1] + offset[1], base[2] + offset[2]];
            corners[c] = p;
            values[c] = self.field.value(p[0], p[1], p[2]);
            if values[c] >= self.config.threshold {
                above_mask |= 1 << c;
            }
        }

        if above_mask == 0 || above_mask == 0xFF {
            return false;
        }

        for tet in &CUBE_TETRAHEDRA {
            let mut case_idx = 0usize;
            for (i, &c) in tet.iter().enumerate() {
                if (above_mask >> c) & 1 == 1 {
                    case_idx |= 1 << i;
                }
            }
            if TETRA_EDGE_TABLE[case_idx] == 0 {
                continue;
            }

            let tris = &TETRA_TRI_TABLE[case_idx];
            for t in 0..TETRA_TRI_COUNT[case_idx] {
                let mut triangle = [0u32; 3];
                for (slot, &edge) in triangle.iter_mut().zip(&tris[t * 3..t * 3 + 3]) {
                    let [a, b] = TETRA_EDGES[edge as usize];
                    let (ca, cb) = (tet[a], tet[b]);
                    *slot = self.edge_vertex(corners[ca], values[ca], corners[cb], values[cb]);
                }
                self.mesh.push_triangle(triangle);
            }
        }

        true
    }

    /// Index of the crossing vertex on the grid edge `pa`-`pb`, creating it on first use
    fn edge_vertex(&mut self, pa: [usize; 3], va: f64, pb: [usize; 3], vb: f64) -> u32 {
        let ka = self.grid.linear_index(pa[0], pa[1], pa[2]);
        let kb = self.grid.linear_index(pb[0], pb[1], pb[2]);

        // Always interpolate from the lower index so the result is independent
        // of which cube reaches the edge first.
        let (key, (p0, v0), (p1, v1)) = if ka < kb {
            ((ka, kb), (pa, va), (pb, vb))
        } else {
            ((kb, ka), (pb, vb), (pa, va))
        };

        if let Some(&index) = self.edge_vertices.get(&key) {
            return index;
        }

        // Exactly one endpoint is above the threshold, so v0 != v1
        let t = ((self.config.threshold - v0) / (v1 - v0)).clamp(0.0, 1.0);

        let position = self
            .grid
            .point_position(p0[0], p0[1], p0[2])
            .lerp(self.grid.point_position(p1[0], p1[1], p1[2]), t);

        let vertex = if self.config.compute_normals {
            let g0 = self.field.gradient(p0[0], p0[1], p0[2]);
            let g1 = self.field.gradient(p1[0], p1[1], p1[2]);
            let normal: Vec3 = (-g0.lerp(g1, t)).normalized();
            MeshVertex::new(position.to_f32_array(), normal.to_f32_array())
        } else {
            MeshVertex::from_position(position.to_f32_array())
        };

        let index = self.mesh.push_vertex(vertex);
        self.edge_vertices.insert(key, index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense f64 field for exercising the extractor directly
    struct DenseField {
        grid: UniformGrid,
        values: Vec<f64>,
    }

    impl DenseField {
        fn new(n: usize, f: impl Fn(Vec3) -> f64) -> Self {
            let grid = UniformGrid::new([n; 3], Vec3::ZERO, Vec3::ONE);
            let mut values = vec![0.0; grid.point_count()];
            for iz in 0..n {
                for iy in 0..n {
                    for ix in 0..n {
                        values[grid.linear_index(ix, iy, iz)] = f(grid.point_position(ix, iy, iz));
                    }
                }
            }
            Self { grid, values }
        }
    }

    impl ScalarField for DenseField {
        fn grid(&self) -> UniformGrid {
            self.grid
        }

        fn value(&self, ix: usize, iy: usize, iz: usize) -> f64 {
            self.values[self.grid.linear_index(ix, iy, iz)]
        }
    }

    #[test]
    fn test_constant_field_is_empty() {
        let field = DenseField::new(5, |_| 10.0);
        assert!(extract(&field, 50.0).is_empty());
        assert!(extract(&field, 5.0).is_empty());
    }

    #[test]
    fn test_plane_vertices_lie_on_level() {
        // f = x crosses 1.5 halfway between the x = 1 and x = 2 layers
        let field = DenseField::new(4, |p| p.x);
        let mesh = extract(&field, 1.5);

        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            assert!((v.position[0] - 1.5).abs() < 1e-6, "vertex off plane: {:?}", v.position);
        }
    }

    #[test]
    fn test_plane_normals_point_down_gradient() {
        let field = DenseField::new(4, |p| p.x);
        let mesh = extract(&field, 1.5);
        for v in &mesh.vertices {
            assert!((v.normal[0] + 1.0).abs() < 1e-6, "normal {:?}", v.normal);
            assert!(v.normal[1].abs() < 1e-6);
            assert!(v.normal[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_plane_area_matches_cross_section() {
        // The x = 1.5 plane inside a 3x3x3 cell block has area 3 * 3
        let field = DenseField::new(4, |p| p.x);
        let mesh = extract(&field, 1.5);

        let area: f64 = mesh
            .triangles()
            .map(|[a, b, c]| {
                let p = |i: u32| {
                    let [x, y, z] = mesh.vertices[i as usize].position;
                    Vec3::new(x as f64, y as f64, z as f64)
                };
                let (u, v) = (p(b) - p(a), p(c) - p(a));
                let cross = Vec3::new(u.y * v.z - u.z * v.y, u.z * v.x - u.x * v.z, u.x * v.y - u.y * v.x);
                cross.length() * 0.5
            })
            .sum();
        assert!((area - 9.0).abs() < 1e-4, "area was {}", area);
    }

    #[test]
    fn test_vertices_are_shared() {
        let field = DenseField::new(4, |p| p.x);
        let mesh = extract(&field, 1.5);
        // One vertex per crossed grid edge: x-edges between layers 1 and 2
        // (4 x 4 = 16) plus the diagonals of the tetrahedral split crossing
        // the plane, never one vertex per triangle corner.
        assert!(mesh.vertex_count() < mesh.triangle_count() * 3);
        assert!(mesh.vertex_count() >= 16);
    }

    #[test]
    fn test_normals_disabled() {
        let field = DenseField::new(4, |p| p.x);
        let mesh = IsoSurfaceExtractor::new(ExtractorConfig {
            threshold: 1.5,
            compute_normals: false,
        })
        .extract(&field);
        assert!(!mesh.has_normals);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0; 3]));
    }

    #[test]
    fn test_sphere_vertices_near_radius() {
        let c = Vec3::new(4.0, 4.0, 4.0);
        let field = DenseField::new(9, |p| (p - c).length());
        let mesh = extract(&field, 2.5);

        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let r = (Vec3::new(x as f64, y as f64, z as f64) - c).length();
            // Linear interpolation of a distance field stays within a cell of the sphere
            assert!((r - 2.5).abs() < 0.5, "radius {}", r);
        }
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        let field = DenseField {
            grid: UniformGrid::new([1, 4, 4], Vec3::ZERO, Vec3::ONE),
            values: vec![100.0; 16],
        };
        assert!(extract(&field, 50.0).is_empty());
    }
}
