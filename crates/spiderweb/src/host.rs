//! Collaborator contracts between the generator and its host application.
//!
//! The generator never talks to a host directly. It asks a [`SelectionSource`]
//! what is selected, a [`PointSampler`] for anchor points, and a
//! [`CurveAssembler`] to materialize the finished strand set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WebError;
use crate::params::SampleMethod;
use crate::strand::Vec3;

/// Opaque handle to a host object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object #{}", self.0)
    }
}

/// Read access to the current selection.
pub trait SelectionSource {
    /// Selected objects in selection order.
    fn selected_objects(&self) -> Vec<ObjectId>;

    /// Whether `object` carries mesh data.
    fn is_mesh(&self, object: ObjectId) -> bool;
}

/// Samples world-space anchor points from an object.
///
/// Contract
/// - Returns exactly `count` points, except for [`SampleMethod::Pivot`] which
///   always returns the single object origin.
/// - `seed` is used as given on every call; the sampler seeds itself.
/// - Any transient state attached to the object must be removed before
///   returning, on success and on failure.
pub trait PointSampler {
    fn sample(
        &mut self,
        object: ObjectId,
        count: usize,
        method: SampleMethod,
        apply_modifiers: bool,
        seed: i64,
    ) -> Result<Vec<Vec3>, WebError>;
}

/// Builds a curve object from strands.
pub trait CurveAssembler {
    type Curve;

    fn new_curve(&mut self, name: &str) -> Self::Curve;

    /// Evaluation steps per control-point span. Hosts without the notion may ignore it.
    fn set_resolution(&mut self, _curve: &mut Self::Curve, _resolution_u: u32) {}

    /// Append one smooth spline through `points`.
    fn add_spline(&mut self, curve: &mut Self::Curve, points: &[Vec3]);

    /// Wrap `curve` in a new object called `name` and link it into the scene.
    fn link_into_scene(&mut self, curve: Self::Curve, name: &str) -> ObjectId;

    fn set_active(&mut self, object: ObjectId);
}

/// Everything the operator needs from a host.
pub trait Host: SelectionSource + PointSampler + CurveAssembler {}

impl<T: SelectionSource + PointSampler + CurveAssembler> Host for T {}
