//! Native point sampling on [`MeshData`].
//!
//! Every call seeds its own RNG from the seed it is given, so the same object
//! sampled twice with the same arguments yields the same points.

use nalgebra::{Matrix4, Point3};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use super::mesh::MeshData;
use crate::strand::Vec3;
use crate::web::seeded_rng;

/// Rejection-sampling budget per requested volume point.
const VOLUME_ATTEMPTS_PER_POINT: usize = 1000;

/// Name of the transient modifier surface/volume sampling attaches.
pub const SAMPLING_MODIFIER: &str = "points";

/// Keeps [`SAMPLING_MODIFIER`] on a modifier stack for as long as it lives.
pub(crate) struct ScopedModifier<'a> {
    stack: &'a mut Vec<String>,
}

impl<'a> ScopedModifier<'a> {
    pub(crate) fn attach(stack: &'a mut Vec<String>) -> Self {
        stack.push(SAMPLING_MODIFIER.to_string());
        Self { stack }
    }
}

impl Drop for ScopedModifier<'_> {
    fn drop(&mut self) {
        if let Some(pos) = self.stack.iter().rposition(|m| m == SAMPLING_MODIFIER) {
            self.stack.remove(pos);
        }
    }
}

#[inline]
pub(crate) fn to_world(matrix: &Matrix4<f64>, p: Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(p)).coords
}

#[inline]
pub(crate) fn translation(matrix: &Matrix4<f64>) -> Vec3 {
    Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

/// Uniformly chosen existing vertices (with repetition).
pub fn sample_verts(mesh: &MeshData, count: usize, seed: i64) -> Result<Vec<Vec3>, String> {
    if count > 0 && mesh.vertices.is_empty() {
        return Err("mesh has no vertices".into());
    }
    let mut rng = seeded_rng(seed);
    Ok((0..count)
        .map(|_| mesh.vertices[rng.gen_range(0..mesh.vertices.len())])
        .collect())
}

/// Uniform points along uniformly chosen edges.
pub fn sample_edges(mesh: &MeshData, count: usize, seed: i64) -> Result<Vec<Vec3>, String> {
    let edges = mesh.edge_list();
    if count > 0 && edges.is_empty() {
        return Err("mesh has no edges".into());
    }
    let mut rng = seeded_rng(seed);
    Ok((0..count)
        .map(|_| {
            let [a, b] = edges[rng.gen_range(0..edges.len())];
            let (va, vb) = (mesh.vertices[a], mesh.vertices[b]);
            let t: f64 = rng.gen();
            va + (vb - va) * t
        })
        .collect())
}

/// Area-weighted triangle, then a uniform barycentric point.
pub fn sample_surface(mesh: &MeshData, count: usize, seed: i64) -> Result<Vec<Vec3>, String> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let areas: Vec<f64> = (0..mesh.triangles.len())
        .map(|i| mesh.triangle_area(i))
        .collect();
    let faces = WeightedIndex::new(&areas).map_err(|e| format!("surface distribution: {e}"))?;
    let mut rng = seeded_rng(seed);
    Ok((0..count)
        .map(|_| point_in_triangle(mesh.triangle(faces.sample(&mut rng)), &mut rng))
        .collect())
}

/// Rejection sampling inside the bounding box against the ray-parity test.
pub fn sample_volume(mesh: &MeshData, count: usize, seed: i64) -> Result<Vec<Vec3>, String> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if mesh.triangles.is_empty() {
        return Err("mesh has no faces to bound a volume".into());
    }
    let (lo, hi) = mesh.bounds().ok_or("mesh has no vertices")?;
    let mut rng = seeded_rng(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count * VOLUME_ATTEMPTS_PER_POINT {
        let u = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        let p = lo + (hi - lo).component_mul(&u);
        if mesh.contains(p) {
            out.push(p);
            if out.len() == count {
                return Ok(out);
            }
        }
    }
    Err(format!(
        "found {} of {count} interior points; is the mesh closed?",
        out.len()
    ))
}

fn point_in_triangle(tri: [Vec3; 3], rng: &mut StdRng) -> Vec3 {
    let [a, b, c] = tri;
    let (mut u, mut v): (f64, f64) = (rng.gen(), rng.gen());
    if u + v > 1.0 {
        u = 1.0 - u;
        v = 1.0 - v;
    }
    a + (b - a) * u + (c - a) * v
}
