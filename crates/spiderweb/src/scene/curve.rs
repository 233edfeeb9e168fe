//! Curve data produced by the web operator.

use serde::{Deserialize, Serialize};

use crate::strand::Vec3;

/// Default evaluation steps per control-point span.
pub const DEFAULT_RESOLUTION_U: u32 = 12;

/// One smooth spline: order-3 NURBS clamped to its end points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    pub points: Vec<Vec3>,
    pub order: u8,
    pub use_endpoint: bool,
}

impl Spline {
    pub fn smooth(points: &[Vec3]) -> Self {
        Self {
            points: points.to_vec(),
            order: 3,
            use_endpoint: true,
        }
    }
}

/// Curve datablock: a named list of splines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebCurve {
    pub name: String,
    pub resolution_u: u32,
    pub splines: Vec<Spline>,
}

impl WebCurve {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolution_u: DEFAULT_RESOLUTION_U,
            splines: Vec::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.splines.iter().map(|s| s.points.len()).sum()
    }
}
