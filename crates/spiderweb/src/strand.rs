//! Strands: 3-point curve segments between two anchors.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// World-space point.
pub type Vec3 = Vector3<f64>;

/// Control points per strand.
pub const STRAND_POINTS: usize = 3;

/// A `(start, mid, end)` strand.
///
/// Invariants:
/// - Before draping, `mid == start + (end - start) * 0.5` exactly.
/// - Draping only changes `mid.z`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strand {
    pub start: Vec3,
    pub mid: Vec3,
    pub end: Vec3,
}

impl Strand {
    /// Straight strand with its control point at the midpoint.
    #[inline]
    pub fn between(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            mid: midpoint(start, end),
            end,
        }
    }

    /// Chord length `|end - start|`.
    #[inline]
    pub fn span(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[inline]
    pub fn control_points(&self) -> [Vec3; STRAND_POINTS] {
        [self.start, self.mid, self.end]
    }

    /// Point on the evaluated curve at `t ∈ [0, 1]`.
    ///
    /// A 3-point, order-3, endpoint-clamped spline with unit weights is the
    /// quadratic Bézier with `mid` as its control point.
    pub fn point_at(&self, t: f64) -> Vec3 {
        let s = 1.0 - t;
        self.start * (s * s) + self.mid * (2.0 * s * t) + self.end * (t * t)
    }

    /// Evenly spaced points along the evaluated curve, both ends included.
    ///
    /// Yields `resolution_u * (STRAND_POINTS - 1) + 1` points.
    pub fn resolution_points(&self, resolution_u: u32) -> Vec<Vec3> {
        let steps = (resolution_u.max(1) as usize) * (STRAND_POINTS - 1);
        (0..=steps)
            .map(|i| self.point_at(i as f64 / steps as f64))
            .collect()
    }
}

/// `a + (b - a) * 0.5`.
#[inline]
pub fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    a + (b - a) * 0.5
}
