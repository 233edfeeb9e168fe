//! In-memory host: a flat list of objects with a selection and an active object.
//!
//! `Scene` implements every collaborator trait in [`crate::host`], so the CLI
//! and the tests can drive the operator without a real host application.
//! Scenes round-trip through serde for the CLI's JSON files.

pub mod curve;
pub mod mesh;
pub mod sampling;

pub use curve::{Spline, WebCurve};
pub use mesh::MeshData;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WebError;
use crate::host::{CurveAssembler, ObjectId, PointSampler, SelectionSource};
use crate::params::SampleMethod;
use crate::strand::Vec3;
use sampling::{
    sample_edges, sample_surface, sample_verts, sample_volume, to_world, translation,
    ScopedModifier,
};

/// Object payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    /// `evaluated` is the mesh after the object's own modifiers, if any.
    Mesh {
        base: MeshData,
        #[serde(default)]
        evaluated: Option<MeshData>,
    },
    Curve(WebCurve),
    Empty,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
    #[serde(default = "Matrix4::identity")]
    pub matrix_world: Matrix4<f64>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl SceneObject {
    pub fn mesh(name: impl Into<String>, mesh: MeshData, matrix_world: Matrix4<f64>) -> Self {
        Self {
            name: name.into(),
            data: ObjectData::Mesh {
                base: mesh,
                evaluated: None,
            },
            matrix_world,
            modifiers: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub selected: Vec<ObjectId>,
    #[serde(default)]
    pub active: Option<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    /// Add a mesh object translated to `location`.
    pub fn add_mesh(&mut self, name: &str, mesh: MeshData, location: Vec3) -> ObjectId {
        self.add(SceneObject::mesh(
            name,
            mesh,
            Matrix4::new_translation(&location),
        ))
    }

    pub fn select(&mut self, object: ObjectId) {
        if !self.selected.contains(&object) {
            self.selected.push(object);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.objects.len()).map(ObjectId).collect();
    }

    pub fn object(&self, object: ObjectId) -> Option<&SceneObject> {
        self.objects.get(object.0)
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Curve data of `object`, if it is a curve object.
    pub fn curve(&self, object: ObjectId) -> Option<&WebCurve> {
        match &self.object(object)?.data {
            ObjectData::Curve(c) => Some(c),
            _ => None,
        }
    }

    /// `name`, or `name.001`, `name.002`, … if taken.
    fn unique_name(&self, name: &str) -> String {
        if self.find(name).is_none() {
            return name.to_string();
        }
        (1..)
            .map(|i| format!("{name}.{i:03}"))
            .find(|n| self.find(n).is_none())
            .unwrap_or_else(|| name.to_string())
    }
}

impl SelectionSource for Scene {
    fn selected_objects(&self) -> Vec<ObjectId> {
        self.selected.clone()
    }

    fn is_mesh(&self, object: ObjectId) -> bool {
        matches!(
            self.object(object).map(|o| &o.data),
            Some(ObjectData::Mesh { .. })
        )
    }
}

impl PointSampler for Scene {
    fn sample(
        &mut self,
        object: ObjectId,
        count: usize,
        method: SampleMethod,
        apply_modifiers: bool,
        seed: i64,
    ) -> Result<Vec<Vec3>, WebError> {
        let SceneObject {
            data,
            matrix_world,
            modifiers,
            ..
        } = self
            .objects
            .get_mut(object.0)
            .ok_or(WebError::UnknownObject(object))?;

        let world = *matrix_world;
        if method == SampleMethod::Pivot {
            return Ok(vec![translation(&world)]);
        }
        let mesh = match data {
            ObjectData::Mesh { base, evaluated } => match (apply_modifiers, evaluated.as_ref()) {
                (true, Some(deformed)) => &*deformed,
                _ => &*base,
            },
            _ => return Err(WebError::backend(object, "object has no mesh data")),
        };
        mesh.check_indices()
            .map_err(|e| WebError::backend(object, e))?;

        let local = match method {
            SampleMethod::Verts => sample_verts(mesh, count, seed),
            SampleMethod::Edges => sample_edges(mesh, count, seed),
            SampleMethod::Surface | SampleMethod::Volume => {
                let _guard = ScopedModifier::attach(modifiers);
                if method == SampleMethod::Surface {
                    sample_surface(mesh, count, seed)
                } else {
                    sample_volume(mesh, count, seed)
                }
            }
            SampleMethod::Pivot => Ok(vec![Vec3::zeros()]),
        }
        .map_err(|e| WebError::backend(object, e))?;

        debug!(%object, ?method, count, "native sample");
        Ok(local.into_iter().map(|p| to_world(&world, p)).collect())
    }
}

impl CurveAssembler for Scene {
    type Curve = WebCurve;

    fn new_curve(&mut self, name: &str) -> WebCurve {
        WebCurve::new(name)
    }

    fn set_resolution(&mut self, curve: &mut WebCurve, resolution_u: u32) {
        curve.resolution_u = resolution_u;
    }

    fn add_spline(&mut self, curve: &mut WebCurve, points: &[Vec3]) {
        curve.splines.push(Spline::smooth(points));
    }

    fn link_into_scene(&mut self, curve: WebCurve, name: &str) -> ObjectId {
        let name = self.unique_name(name);
        self.add(SceneObject {
            name,
            data: ObjectData::Curve(curve),
            matrix_world: Matrix4::identity(),
            modifiers: Vec::new(),
        })
    }

    fn set_active(&mut self, object: ObjectId) {
        self.active = Some(object);
    }
}
