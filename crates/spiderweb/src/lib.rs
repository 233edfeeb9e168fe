//! Procedural spiderweb and wire networks between mesh objects.
//!
//! Pipeline
//! - Sample anchor points on the selected meshes (`web::distribute`).
//! - Pair anchors into 3-point strands and drape them (`web::main_strands`, `drape`).
//! - Derive sub-strands from points along earlier strands (`web::sub_strands`).
//! - Hand the strand set to a curve assembler (`operator`).
//!
//! Host integration is expressed through the traits in [`host`]; [`scene::Scene`]
//! is an in-memory host used by the CLI and the tests.

pub mod drape;
pub mod error;
pub mod host;
pub mod operator;
pub mod params;
pub mod scene;
pub mod strand;
pub mod web;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::WebError;
pub use nalgebra::{Matrix4 as Mat4, Vector3};
pub use strand::{Strand, Vec3};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::drape::Drape;
    pub use crate::error::WebError;
    pub use crate::host::{CurveAssembler, Host, ObjectId, PointSampler, SelectionSource};
    pub use crate::operator::{
        generate_web, GeneratedWeb, SpiderwebOperator, WebSummary, WEB_OBJECT_NAME,
    };
    pub use crate::params::{SampleMethod, WebParams};
    pub use crate::scene::{MeshData, ObjectData, Scene, SceneObject, Spline, WebCurve};
    pub use crate::strand::{Strand, Vec3};
}
