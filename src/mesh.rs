//! Boundary quad mesh of a lattice, for renderers.
//!
//! The face index depends only on the resolution, so it is built once and
//! reused. Vertex data is rewritten from the current node positions each
//! frame in the same order, which keeps a renderer's index buffer valid.

use crate::float::Float;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Quads covering the six boundary faces of a lattice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceMesh {
    quads: AllocVec<[usize; 4]>,
}

impl SurfaceMesh {
    /// Build the face index for an `nx * ny * nz` lattice whose node
    /// `(i, j, k)` lives at flat index `(i * ny + j) * nz + k`.
    ///
    /// Faces are emitted as left, right, bottom, top, back, front.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        let at = |i: usize, j: usize, k: usize| (i * ny + j) * nz + k;
        let mut quads = AllocVec::new();
        if nx < 2 || ny < 2 || nz < 2 {
            return SurfaceMesh { quads };
        }

        // Left and right: x fixed, sweep y and z.
        for i in [0, nx - 1] {
            for j in 0..ny - 1 {
                for k in 0..nz - 1 {
                    quads.push([at(i, j, k), at(i, j + 1, k), at(i, j + 1, k + 1), at(i, j, k + 1)]);
                }
            }
        }

        // Bottom and top: y fixed, sweep x and z.
        for j in [0, ny - 1] {
            for i in 0..nx - 1 {
                for k in 0..nz - 1 {
                    quads.push([at(i, j, k), at(i + 1, j, k), at(i + 1, j, k + 1), at(i, j, k + 1)]);
                }
            }
        }

        // Back and front: z fixed, sweep x and y.
        for k in [0, nz - 1] {
            for i in 0..nx - 1 {
                for j in 0..ny - 1 {
                    quads.push([at(i, j, k), at(i, j + 1, k), at(i + 1, j + 1, k), at(i + 1, j, k)]);
                }
            }
        }

        SurfaceMesh { quads }
    }

    /// Node indices of every quad.
    pub fn quads(&self) -> &[[usize; 4]] {
        &self.quads
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Vertices per frame: four per quad, unshared.
    pub fn vertex_count(&self) -> usize {
        self.quads.len() * 4
    }

    /// Triangle indices into the unshared vertex buffer written by
    /// [`SurfaceMesh::write_vertices`]. Each quad yields (0,1,2) and (0,2,3).
    pub fn triangle_indices(&self) -> AllocVec<u32> {
        let mut out = AllocVec::with_capacity(self.quads.len() * 6);
        for q in 0..self.quads.len() {
            let base = (q * 4) as u32;
            out.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        out
    }

    /// Triangles as node indices, for renderers that share vertices.
    pub fn node_triangles(&self) -> AllocVec<[usize; 3]> {
        let mut out = AllocVec::with_capacity(self.quads.len() * 2);
        for &[a, b, c, d] in &self.quads {
            out.push([a, b, c]);
            out.push([a, c, d]);
        }
        out
    }

    /// Rewrite `out` with flat xyz vertex data from `positions`.
    pub fn write_vertices<F: Float>(&self, positions: &[Vec3<F>], out: &mut AllocVec<F>) {
        out.clear();
        out.reserve(self.vertex_count() * 3);
        for quad in &self.quads {
            for &node in quad {
                let p = positions[node];
                out.extend_from_slice(&[p.x, p.y, p.z]);
            }
        }
    }
}
