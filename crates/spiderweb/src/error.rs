//! Error type shared by generation, sampling and assembly.

use thiserror::Error;

use crate::host::ObjectId;

/// Everything that can abort a web invocation.
///
/// All variants are raised before the curve assembler is touched, so a failed
/// invocation never leaves a partial curve behind.
#[derive(Debug, Error)]
pub enum WebError {
    /// No selected object is a mesh.
    #[error("no mesh object is selected")]
    Precondition,

    /// Point distribution was asked to spread points over zero objects.
    #[error("no mesh objects to distribute sample points over")]
    EmptyPool,

    /// Pairing needed a second, different candidate and none could be found.
    #[error("degenerate sample: {reason}")]
    DegenerateSample { reason: String },

    /// The point sampler failed for one object.
    #[error("sampling {object} failed: {reason}")]
    SamplingBackend { object: ObjectId, reason: String },

    /// A parameter is outside its accepted range.
    #[error("invalid params: {reason}")]
    InvalidParams { reason: String },

    /// A collaborator was handed an id it does not know.
    #[error("unknown object {0}")]
    UnknownObject(ObjectId),
}

impl WebError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            reason: reason.into(),
        }
    }

    pub(crate) fn backend(object: ObjectId, reason: impl Into<String>) -> Self {
        Self::SamplingBackend {
            object,
            reason: reason.into(),
        }
    }
}
