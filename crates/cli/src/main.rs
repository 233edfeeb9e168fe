use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use spiderweb::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod record;

use record::RunRecord;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = SpiderwebOperator::DESCRIPTION)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the web operator on a scene file and write the resulting curve
    Generate {
        /// Scene JSON to read
        #[arg(long)]
        scene: PathBuf,
        /// Curve JSON to write; a `<stem>.record.json` run record is written next to it
        #[arg(long)]
        out: PathBuf,
        /// Params JSON; flags below override it
        #[arg(long)]
        params: Option<PathBuf>,
        /// Object names to select instead of the scene's own selection
        #[arg(long, value_delimiter = ',', conflicts_with = "select_all")]
        select: Vec<String>,
        /// Select every object in the scene
        #[arg(long)]
        select_all: bool,
        /// Also write the scene with the new web object linked in
        #[arg(long)]
        write_scene: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the operator metadata and default params as JSON
    Defaults,
    /// Write a small demo scene (two selected cubes)
    Demo {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Default)]
struct Overrides {
    #[arg(long)]
    amount: Option<u32>,
    #[arg(long)]
    main_iterations: Option<u32>,
    #[arg(long)]
    sub_iterations: Option<u32>,
    /// Sub-strands only anchor on main strands
    #[arg(long)]
    flat: bool,
    #[arg(long, value_enum)]
    method: Option<MethodArg>,
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    drape_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    drape_max: Option<f64>,
    /// Drape does not scale with strand length
    #[arg(long)]
    no_length_solver: bool,
    #[arg(long)]
    resolution_u: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Pivot,
    Volume,
    Surface,
    Edges,
    Verts,
}

impl From<MethodArg> for SampleMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Pivot => SampleMethod::Pivot,
            MethodArg::Volume => SampleMethod::Volume,
            MethodArg::Surface => SampleMethod::Surface,
            MethodArg::Edges => SampleMethod::Edges,
            MethodArg::Verts => SampleMethod::Verts,
        }
    }
}

impl Overrides {
    fn apply(&self, mut p: WebParams) -> WebParams {
        if let Some(v) = self.amount {
            p.amount = v;
        }
        if let Some(v) = self.main_iterations {
            p.main_iterations = v;
        }
        if let Some(v) = self.sub_iterations {
            p.sub_iterations = v;
        }
        if self.flat {
            p.include_sub = false;
        }
        if let Some(m) = self.method {
            p.method = m.into();
        }
        if let Some(v) = self.seed {
            p.seed = v;
        }
        if let Some(v) = self.drape_min {
            p.drape_min = v;
        }
        if let Some(v) = self.drape_max {
            p.drape_max = v;
        }
        if self.no_length_solver {
            p.length_solver = false;
        }
        if let Some(v) = self.resolution_u {
            p.resolution_u = v;
        }
        p
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            scene,
            out,
            params,
            select,
            select_all,
            write_scene,
            overrides,
        } => generate(
            &scene,
            &out,
            params.as_deref(),
            &Selection::from_args(select, select_all),
            write_scene.as_deref(),
            &overrides,
        ),
        Action::Defaults => defaults(),
        Action::Demo { out } => demo(&out),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn load_params(path: Option<&Path>, overrides: &Overrides) -> Result<WebParams> {
    let base = match path {
        Some(p) => read_json(p)?,
        None => WebParams::default(),
    };
    Ok(overrides.apply(base))
}

/// Which objects to run on.
#[derive(Debug, PartialEq)]
enum Selection {
    /// Whatever the scene file has selected.
    Scene,
    All,
    Named(Vec<String>),
}

impl Selection {
    fn from_args(names: Vec<String>, all: bool) -> Self {
        if all {
            Selection::All
        } else if names.is_empty() {
            Selection::Scene
        } else {
            Selection::Named(names)
        }
    }

    fn apply(&self, scene: &mut Scene) -> Result<()> {
        match self {
            Selection::Scene => {}
            Selection::All => scene.select_all(),
            Selection::Named(names) => {
                let mut ids = Vec::with_capacity(names.len());
                for name in names {
                    match scene.find(name) {
                        Some(id) => ids.push(id),
                        None => bail!("no object named {name:?} in scene"),
                    }
                }
                scene.selected = ids;
            }
        }
        Ok(())
    }
}

fn generate(
    scene_path: &Path,
    out: &Path,
    params_path: Option<&Path>,
    selection: &Selection,
    write_scene: Option<&Path>,
    overrides: &Overrides,
) -> Result<()> {
    let params = load_params(params_path, overrides)?;
    let mut scene: Scene = read_json(scene_path)?;
    selection.apply(&mut scene)?;
    tracing::info!(
        scene = %scene_path.display(),
        out = %out.display(),
        seed = params.seed,
        method = ?params.method,
        "generate"
    );

    let op = SpiderwebOperator::new(params.clone());
    let summary = op.run(&mut scene).context("creating spiderweb")?;
    let curve = scene
        .curve(summary.object)
        .context("operator did not link a curve object")?;
    write_json(out, curve)?;
    tracing::info!(
        pool = summary.pool_size,
        main = summary.main_strands,
        sub = summary.sub_strands,
        "web written"
    );

    let record_path =
        RunRecord::new(&scene, scene_path, out, &params, &summary).write()?;
    tracing::debug!(record = %record_path.display(), "run record");

    if let Some(path) = write_scene {
        write_json(path, &scene)?;
    }
    Ok(())
}

fn defaults_doc() -> serde_json::Value {
    let methods: Vec<_> = SampleMethod::ALL
        .iter()
        .map(|m| serde_json::json!({ "id": m, "label": m.label() }))
        .collect();
    serde_json::json!({
        "operator": {
            "id": SpiderwebOperator::ID,
            "label": SpiderwebOperator::LABEL,
            "icon": SpiderwebOperator::ICON,
            "description": SpiderwebOperator::DESCRIPTION,
        },
        "methods": methods,
        "params": WebParams::default(),
    })
}

fn defaults() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&defaults_doc())?);
    Ok(())
}

fn demo_scene() -> Scene {
    let mut scene = Scene::new();
    let left = scene.add_mesh("left", MeshData::cube(1.0), Vec3::new(-4.0, 0.0, 1.0));
    let right = scene.add_mesh("right", MeshData::cube(1.0), Vec3::new(4.0, 0.0, 1.0));
    scene.select(left);
    scene.select(right);
    scene
}

fn demo(out: &Path) -> Result<()> {
    tracing::info!(out = %out.display(), "demo scene");
    write_json(out, &demo_scene())
}
