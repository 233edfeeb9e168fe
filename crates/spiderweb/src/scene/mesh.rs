//! Triangle meshes as the in-memory host stores them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::strand::Vec3;

/// Hit tolerance for the inside test.
const RAY_EPS: f64 = 1e-12;

/// Vertices plus optional explicit edges and triangles (object space).
///
/// Invariants:
/// - Indices refer into `vertices`; checked by [`MeshData::check_indices`].
/// - Empty `edges` means "derive from triangles".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
    #[serde(default)]
    pub triangles: Vec<[usize; 3]>,
}

impl MeshData {
    /// Mesh with edges derived from the triangle boundaries.
    pub fn from_triangles(vertices: Vec<Vec3>, triangles: Vec<[usize; 3]>) -> Self {
        let mut mesh = Self {
            vertices,
            edges: Vec::new(),
            triangles,
        };
        mesh.edges = mesh.edge_list();
        mesh
    }

    /// Axis-aligned cube centred on the origin.
    pub fn cube(half_extent: f64) -> Self {
        let h = half_extent;
        let vertices = (0..8)
            .map(|i| {
                let pick = |bit: usize| if i & bit == 0 { -h } else { h };
                Vec3::new(pick(1), pick(2), pick(4))
            })
            .collect();
        let triangles = vec![
            [0, 4, 6],
            [0, 6, 2],
            [1, 3, 7],
            [1, 7, 5],
            [0, 1, 5],
            [0, 5, 4],
            [2, 6, 7],
            [2, 7, 3],
            [0, 2, 3],
            [0, 3, 1],
            [4, 5, 7],
            [4, 7, 6],
        ];
        let mut edges = Vec::with_capacity(12);
        for i in 0..8usize {
            for bit in [1usize, 2, 4] {
                if i & bit == 0 {
                    edges.push([i, i | bit]);
                }
            }
        }
        Self {
            vertices,
            edges,
            triangles,
        }
    }

    /// Explicit edges, or the unique triangle boundary edges.
    pub fn edge_list(&self) -> Vec<[usize; 2]> {
        if !self.edges.is_empty() {
            return self.edges.clone();
        }
        let mut set = BTreeSet::new();
        for t in &self.triangles {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                set.insert([a.min(b), a.max(b)]);
            }
        }
        set.into_iter().collect()
    }

    pub fn check_indices(&self) -> Result<(), String> {
        let n = self.vertices.len();
        let bad_edge = self.edges.iter().flatten().any(|&i| i >= n);
        let bad_tri = self.triangles.iter().flatten().any(|&i| i >= n);
        if bad_edge || bad_tri {
            return Err(format!("index out of range for {n} vertices"));
        }
        Ok(())
    }

    #[inline]
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        let t = self.triangles[i];
        [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]]
    }

    pub fn triangle_area(&self, i: usize) -> f64 {
        let [a, b, c] = self.triangle(i);
        0.5 * (b - a).cross(&(c - a)).norm()
    }

    /// Axis-aligned bounds `(min, max)`; `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.inf(v), hi.sup(v))
        }))
    }

    /// Ray-parity inside test. Meaningful for closed meshes only.
    pub fn contains(&self, p: Vec3) -> bool {
        // Skewed direction so rays rarely graze edges or vertices exactly.
        let dir = Vec3::new(1.0, 0.000_123_7, 0.000_071_3).normalize();
        let hits = (0..self.triangles.len())
            .filter(|&i| ray_hits_triangle(p, dir, self.triangle(i)))
            .count();
        hits % 2 == 1
    }
}

/// Möller–Trumbore, counting only hits in front of the origin.
fn ray_hits_triangle(origin: Vec3, dir: Vec3, [a, b, c]: [Vec3; 3]) -> bool {
    let e1 = b - a;
    let e2 = c - a;
    let pvec = dir.cross(&e2);
    let det = e1.dot(&pvec);
    if det.abs() < RAY_EPS {
        return false;
    }
    let inv = 1.0 / det;
    let tvec = origin - a;
    let u = tvec.dot(&pvec) * inv;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }
    let qvec = tvec.cross(&e1);
    let v = dir.dot(&qvec) * inv;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }
    e2.dot(&qvec) * inv > RAY_EPS
}
