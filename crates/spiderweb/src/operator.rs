//! The "create spiderweb" command.
//!
//! `SpiderwebOperator` is the frontend-agnostic form of the host menu command:
//! a parameter struct with `poll` (is the command available?) and `execute`
//! (generate and link the curve). Nothing is handed to the curve assembler
//! until the whole strand set exists.

use tracing::{debug, info};

use crate::error::WebError;
use crate::host::{Host, ObjectId, PointSampler, SelectionSource};
use crate::params::WebParams;
use crate::strand::Strand;
use crate::web::{build_sample_pool, generate_main_strands, generate_sub_strands, seeded_rng};

/// Name of the object (and curve) the operator creates.
pub const WEB_OBJECT_NAME: &str = "web";

/// Strands of one run plus the sizes of its phases.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedWeb {
    pub strands: Vec<Strand>,
    pub pool_size: usize,
    pub main_count: usize,
}

impl GeneratedWeb {
    pub fn sub_count(&self) -> usize {
        self.strands.len() - self.main_count
    }
}

/// What `SpiderwebOperator::run` produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WebSummary {
    pub object: ObjectId,
    pub pool_size: usize,
    pub main_strands: usize,
    pub sub_strands: usize,
}

/// Run the full generation pipeline over `objects`.
pub fn generate_web<S: PointSampler + ?Sized>(
    sampler: &mut S,
    objects: &[ObjectId],
    params: &WebParams,
) -> Result<GeneratedWeb, WebError> {
    params.validate()?;
    if objects.is_empty() {
        return Err(WebError::EmptyPool);
    }
    let mut rng = seeded_rng(params.seed);
    let pool = build_sample_pool(sampler, objects, params, &mut rng)?;
    debug!(objects = objects.len(), pool = pool.len(), "sample pool");
    let main = generate_main_strands(&pool, params, &mut rng)?;
    let main_count = main.len();
    let strands = generate_sub_strands(main, params, &mut rng)?;
    debug!(
        main = main_count,
        sub = strands.len() - main_count,
        "strands generated"
    );
    Ok(GeneratedWeb {
        strands,
        pool_size: pool.len(),
        main_count,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpiderwebOperator {
    pub params: WebParams,
}

impl SpiderwebOperator {
    pub const ID: &'static str = "curve.spiderweb";
    pub const LABEL: &'static str = "Create spiderweb";
    pub const ICON: &'static str = "OUTLINER_DATA_CURVE";
    pub const DESCRIPTION: &'static str =
        "Add a spiderweb (or wires) between the selected objects";

    pub fn new(params: WebParams) -> Self {
        Self { params }
    }

    /// Available when at least one selected object is a mesh.
    pub fn poll<H: SelectionSource + ?Sized>(host: &H) -> bool {
        host.selected_objects().into_iter().any(|o| host.is_mesh(o))
    }

    /// Selected mesh objects in selection order.
    pub fn mesh_objects<H: SelectionSource + ?Sized>(host: &H) -> Vec<ObjectId> {
        host.selected_objects()
            .into_iter()
            .filter(|&o| host.is_mesh(o))
            .collect()
    }

    /// Generate the strand set without assembling a curve.
    pub fn generate<H>(&self, host: &mut H) -> Result<GeneratedWeb, WebError>
    where
        H: SelectionSource + PointSampler + ?Sized,
    {
        let objects = Self::mesh_objects(host);
        if objects.is_empty() {
            return Err(WebError::Precondition);
        }
        generate_web(host, &objects, &self.params)
    }

    /// Generate, then build, link and activate the `web` curve object.
    pub fn run<H: Host + ?Sized>(&self, host: &mut H) -> Result<WebSummary, WebError> {
        let web = self.generate(host)?;
        let mut curve = host.new_curve(WEB_OBJECT_NAME);
        host.set_resolution(&mut curve, self.params.resolution_u);
        for strand in &web.strands {
            host.add_spline(&mut curve, &strand.control_points());
        }
        let object = host.link_into_scene(curve, WEB_OBJECT_NAME);
        host.set_active(object);
        info!(%object, splines = web.strands.len(), seed = self.params.seed, "web created");
        Ok(WebSummary {
            object,
            pool_size: web.pool_size,
            main_strands: web.main_count,
            sub_strands: web.sub_count(),
        })
    }

    /// [`run`](Self::run), keeping only the new object.
    pub fn execute<H: Host + ?Sized>(&self, host: &mut H) -> Result<ObjectId, WebError> {
        self.run(host).map(|summary| summary.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SampleMethod;
    use crate::scene::{MeshData, ObjectData, Scene, SceneObject};
    use crate::strand::Vec3;
    use nalgebra::Matrix4;

    fn scene_with_cubes(n: usize) -> Scene {
        let mut scene = Scene::new();
        for i in 0..n {
            let id = scene.add_mesh(
                &format!("cube{i}"),
                MeshData::cube(0.5),
                Vec3::new(i as f64 * 4.0, (i % 2) as f64 * 3.0, 0.0),
            );
            scene.select(id);
        }
        scene
    }

    #[test]
    fn poll_needs_a_selected_mesh() {
        let mut scene = Scene::new();
        assert!(!SpiderwebOperator::poll(&scene));
        let e = scene.add(SceneObject {
            name: "empty".into(),
            data: ObjectData::Empty,
            matrix_world: Matrix4::identity(),
            modifiers: Vec::new(),
        });
        scene.select(e);
        assert!(!SpiderwebOperator::poll(&scene));
        let m = scene.add_mesh("m", MeshData::cube(1.0), Vec3::zeros());
        assert!(!SpiderwebOperator::poll(&scene));
        scene.select(m);
        assert!(SpiderwebOperator::poll(&scene));
        assert_eq!(SpiderwebOperator::mesh_objects(&scene), vec![m]);
    }

    #[test]
    fn execute_links_an_active_web_with_three_point_splines() {
        let mut scene = scene_with_cubes(3);
        let op = SpiderwebOperator::new(WebParams {
            amount: 9,
            sub_iterations: 1,
            ..WebParams::default()
        });
        let id = op.execute(&mut scene).unwrap();
        assert_eq!(scene.active, Some(id));
        assert_eq!(scene.objects[id.0].name, WEB_OBJECT_NAME);
        let curve = scene.curve(id).unwrap();
        // 9 main + ceil(9/2) recursive sub-strands
        assert_eq!(curve.splines.len(), 9 + 5);
        assert!(curve.splines.iter().all(|s| s.points.len() == 3 && s.order == 3));
    }

    #[test]
    fn run_reports_phase_sizes_and_carries_resolution() {
        let mut scene = scene_with_cubes(2);
        let op = SpiderwebOperator::new(WebParams {
            amount: 6,
            main_iterations: 2,
            include_sub: false,
            sub_iterations: 2,
            resolution_u: 4,
            ..WebParams::default()
        });
        let summary = op.run(&mut scene).unwrap();
        assert_eq!(summary.pool_size, 6);
        assert_eq!(summary.main_strands, 12);
        assert_eq!(summary.sub_strands, 2 * 6);
        let curve = scene.curve(summary.object).unwrap();
        assert_eq!(curve.resolution_u, 4);
        assert_eq!(curve.splines.len(), 24);
    }

    #[test]
    fn failure_creates_no_object() {
        let mut scene = Scene::new();
        let op = SpiderwebOperator::default();
        assert!(matches!(op.execute(&mut scene), Err(WebError::Precondition)));
        assert!(scene.objects.is_empty());
        assert_eq!(scene.active, None);

        // Pivot of a single object: one anchor only.
        let mut scene = scene_with_cubes(1);
        let op = SpiderwebOperator::new(WebParams {
            method: SampleMethod::Pivot,
            ..WebParams::default()
        });
        assert!(matches!(
            op.execute(&mut scene),
            Err(WebError::DegenerateSample { .. })
        ));
        assert_eq!(scene.objects.len(), 1);
    }

    #[test]
    fn invalid_params_are_rejected_before_sampling() {
        let mut scene = scene_with_cubes(2);
        let op = SpiderwebOperator::new(WebParams {
            amount: 0,
            ..WebParams::default()
        });
        assert!(matches!(
            op.execute(&mut scene),
            Err(WebError::InvalidParams { .. })
        ));
        assert_eq!(scene.objects.len(), 2);
    }

    #[test]
    fn empty_object_list_is_an_empty_pool() {
        let mut scene = Scene::new();
        let r = generate_web(&mut scene, &[], &WebParams::default());
        assert!(matches!(r, Err(WebError::EmptyPool)));
    }
}
