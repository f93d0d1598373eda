//! Lookup tables for marching tetrahedra
//!
//! Every grid cube is split into 6 tetrahedra around its main diagonal
//! (corner 0 to corner 6). A tetrahedron has 4 vertices and 6 edges, so
//! there are 2^4 = 16 configurations of vertices above/below the threshold.
//!
//! The split is the same for every cube, so the diagonal chosen on a shared
//! face always agrees between neighbours and the surface has no cracks.

/// Corner offsets of a cube, in (x, y, z) lattice steps
///
/// Corners 0-3 walk the bottom face counter-clockwise, 4-7 the top face.
pub const CUBE_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0], // Corner 0
    [1, 0, 0], // Corner 1
    [1, 1, 0], // Corner 2
    [0, 1, 0], // Corner 3
    [0, 0, 1], // Corner 4
    [1, 0, 1], // Corner 5
    [1, 1, 1], // Corner 6
    [0, 1, 1], // Corner 7
];

/// The 6 tetrahedra of a cube, as cube corner indices
///
/// Each shares the 0-6 diagonal and fans around it through the
/// corners 1, 2, 3, 7, 4, 5.
pub const CUBE_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 5, 1, 6],
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
];

/// Edge definitions for a tetrahedron
/// Each edge connects two vertices (indexed 0-3)
pub const TETRA_EDGES: [[usize; 2]; 6] = [
    [0, 1], // Edge 0
    [0, 2], // Edge 1
    [0, 3], // Edge 2
    [1, 2], // Edge 3
    [1, 3], // Edge 4
    [2, 3], // Edge 5
];

/// For each case (0-15), which edges are crossed by the iso-surface.
/// Bit i is set if edge i is crossed.
///
/// An edge is crossed when: (vertex_a above XOR vertex_b above)
pub const TETRA_EDGE_TABLE: [u8; 16] = compute_tetra_edge_table();

/// Triangle table: for each case, the edges whose crossing points form
/// each triangle. Up to 6 edge indices (2 triangles), -1 marks the end.
///
/// One isolated vertex gives a single triangle; a 2/2 split gives a quad,
/// emitted as two triangles walking the four crossed edges in cyclic order.
/// Complementary cases (i and 15 - i) share the same entry.
pub const TETRA_TRI_TABLE: [[i8; 6]; 16] = [
    [-1, -1, -1, -1, -1, -1], // 0000: all below
    [0, 1, 2, -1, -1, -1],    // 0001: v0
    [0, 3, 4, -1, -1, -1],    // 0010: v1
    [1, 2, 4, 1, 4, 3],       // 0011: v0 v1
    [1, 3, 5, -1, -1, -1],    // 0100: v2
    [0, 2, 5, 0, 5, 3],       // 0101: v0 v2
    [0, 1, 5, 0, 5, 4],       // 0110: v1 v2
    [2, 4, 5, -1, -1, -1],    // 0111: v3 below
    [2, 4, 5, -1, -1, -1],    // 1000: v3
    [0, 1, 5, 0, 5, 4],       // 1001: v0 v3
    [0, 2, 5, 0, 5, 3],       // 1010: v1 v3
    [1, 3, 5, -1, -1, -1],    // 1011: v2 below
    [1, 2, 4, 1, 4, 3],       // 1100: v2 v3
    [0, 3, 4, -1, -1, -1],    // 1101: v1 below
    [0, 1, 2, -1, -1, -1],    // 1110: v0 below
    [-1, -1, -1, -1, -1, -1], // 1111: all above
];

/// Number of triangles emitted for each case
pub const TETRA_TRI_COUNT: [usize; 16] = compute_tetra_tri_count();

/// Compute the edge table at compile time
const fn compute_tetra_edge_table() -> [u8; 16] {
    let mut table = [0u8; 16];
    let mut case_idx: usize = 0;

    while case_idx < 16 {
        let mut edge_mask = 0u8;
        let mut edge_idx = 0;

        while edge_idx < 6 {
            let v0 = TETRA_EDGES[edge_idx][0];
            let v1 = TETRA_EDGES[edge_idx][1];

            let v0_above = (case_idx >> v0) & 1;
            let v1_above = (case_idx >> v1) & 1;

            if v0_above != v1_above {
                edge_mask |= 1 << edge_idx;
            }

            edge_idx += 1;
        }

        table[case_idx] = edge_mask;
        case_idx += 1;
    }

    table
}

/// Count the triangles of each triangle table entry at compile time
const fn compute_tetra_tri_count() -> [usize; 16] {
    let mut counts = [0usize; 16];
    let mut case_idx = 0;

    while case_idx < 16 {
        let mut n = 0;
        while n < 6 && TETRA_TRI_TABLE[case_idx][n] >= 0 {
            n += 1;
        }
        counts[case_idx] = n / 3;
        case_idx += 1;
    }

    counts
}
