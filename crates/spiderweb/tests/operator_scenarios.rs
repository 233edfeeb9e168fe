//! End-to-end scenarios through `SpiderwebOperator` with scripted hosts.

use std::collections::HashMap;

use spiderweb::prelude::*;

/// Host whose sampler returns fixed per-object points and which records
/// every assembler call.
#[derive(Default)]
struct ScriptedHost {
    selected: Vec<ObjectId>,
    meshes: HashMap<ObjectId, Vec<Vec3>>,
    requests: Vec<(ObjectId, usize, SampleMethod)>,
    curves_created: usize,
    linked: Vec<(String, Vec<Vec<Vec3>>)>,
    active: Option<ObjectId>,
    failing: Option<ObjectId>,
}

impl SelectionSource for ScriptedHost {
    fn selected_objects(&self) -> Vec<ObjectId> {
        self.selected.clone()
    }

    fn is_mesh(&self, object: ObjectId) -> bool {
        self.meshes.contains_key(&object)
    }
}

impl PointSampler for ScriptedHost {
    fn sample(
        &mut self,
        object: ObjectId,
        count: usize,
        method: SampleMethod,
        _apply_modifiers: bool,
        _seed: i64,
    ) -> Result<Vec<Vec3>, WebError> {
        self.requests.push((object, count, method));
        if self.failing == Some(object) {
            return Err(WebError::SamplingBackend {
                object,
                reason: "scripted failure".into(),
            });
        }
        self.meshes
            .get(&object)
            .cloned()
            .ok_or(WebError::UnknownObject(object))
    }
}

impl CurveAssembler for ScriptedHost {
    type Curve = Vec<Vec<Vec3>>;

    fn new_curve(&mut self, _name: &str) -> Self::Curve {
        self.curves_created += 1;
        Vec::new()
    }

    fn add_spline(&mut self, curve: &mut Self::Curve, points: &[Vec3]) {
        curve.push(points.to_vec());
    }

    fn link_into_scene(&mut self, curve: Self::Curve, name: &str) -> ObjectId {
        self.linked.push((name.to_string(), curve));
        ObjectId(1000 + self.linked.len())
    }

    fn set_active(&mut self, object: ObjectId) {
        self.active = Some(object);
    }
}

fn two_objects_two_points_each() -> ScriptedHost {
    let mut host = ScriptedHost::default();
    host.meshes.insert(
        ObjectId(0),
        vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 2.0)],
    );
    host.meshes.insert(
        ObjectId(1),
        vec![Vec3::new(5.0, 1.0, 0.0), Vec3::new(5.0, 1.0, 2.0)],
    );
    host.selected = vec![ObjectId(0), ObjectId(1)];
    host
}

#[test]
fn four_anchors_without_sub_strands_give_four_splines() {
    let mut host = two_objects_two_points_each();
    let op = SpiderwebOperator::new(WebParams {
        amount: 4,
        main_iterations: 1,
        include_sub: false,
        sub_iterations: 0,
        method: SampleMethod::Pivot,
        ..WebParams::default()
    });
    let id = op.execute(&mut host).unwrap();
    assert_eq!(host.active, Some(id));
    assert_eq!(host.curves_created, 1);
    let (name, splines) = &host.linked[0];
    assert_eq!(name, WEB_OBJECT_NAME);
    assert_eq!(splines.len(), 4);
    assert!(splines.iter().all(|s| s.len() == 3));
    assert!(host.requests.iter().all(|r| r.1 == 2 && r.2 == SampleMethod::Pivot));
}

#[test]
fn no_selected_mesh_creates_nothing() {
    let mut host = ScriptedHost::default();
    host.selected = vec![ObjectId(7)];
    let op = SpiderwebOperator::default();
    assert!(!SpiderwebOperator::poll(&host));
    assert!(matches!(op.execute(&mut host), Err(WebError::Precondition)));
    assert_eq!(host.curves_created, 0);
    assert!(host.linked.is_empty());
    assert!(host.requests.is_empty());
}

#[test]
fn sampler_failure_aborts_before_assembly() {
    let mut host = two_objects_two_points_each();
    host.failing = Some(ObjectId(1));
    let op = SpiderwebOperator::default();
    assert!(matches!(
        op.execute(&mut host),
        Err(WebError::SamplingBackend { .. })
    ));
    assert_eq!(host.curves_created, 0);
    assert!(host.active.is_none());
}

#[test]
fn single_anchor_pool_is_degenerate() {
    let mut host = ScriptedHost::default();
    host.meshes.insert(ObjectId(0), vec![Vec3::new(1.0, 1.0, 1.0)]);
    host.selected = vec![ObjectId(0)];
    let op = SpiderwebOperator::default();
    assert!(matches!(
        op.execute(&mut host),
        Err(WebError::DegenerateSample { .. })
    ));
    assert!(host.linked.is_empty());
}

#[test]
fn allocation_of_23_over_5_objects() {
    let mut host = ScriptedHost::default();
    for i in 0..5 {
        host.meshes
            .insert(ObjectId(i), vec![Vec3::new(i as f64, 0.0, 0.0)]);
        host.selected.push(ObjectId(i));
    }
    let op = SpiderwebOperator::new(WebParams {
        amount: 23,
        seed: 5,
        ..WebParams::default()
    });
    op.generate(&mut host).unwrap();
    let counts: Vec<usize> = host.requests.iter().map(|r| r.1).collect();
    assert_eq!(counts, vec![5, 5, 5, 4, 4]);
    assert_eq!(counts.iter().sum::<usize>(), 23);
}

#[test]
fn scene_host_is_deterministic_for_every_method() {
    for method in SampleMethod::ALL {
        let build = || {
            let mut scene = Scene::new();
            for i in 0..3 {
                let id = scene.add_mesh(
                    &format!("c{i}"),
                    MeshData::cube(1.0),
                    Vec3::new(i as f64 * 5.0, 0.0, i as f64),
                );
                scene.select(id);
            }
            scene
        };
        let op = SpiderwebOperator::new(WebParams {
            amount: 12,
            method,
            seed: 31,
            ..WebParams::default()
        });
        let (mut a, mut b) = (build(), build());
        let ia = op.execute(&mut a).unwrap();
        let ib = op.execute(&mut b).unwrap();
        assert_eq!(a.curve(ia), b.curve(ib), "method {method:?}");
    }
}
