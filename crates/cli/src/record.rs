//! Run record written next to every generated web.
//!
//! `<out stem>.record.json` holds everything needed to regenerate the web from
//! the same scene file: the exact params, which objects were sampled, and the
//! phase sizes the run produced.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spiderweb::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub spiderweb_version: String,
    pub code_rev: Option<String>,
    pub scene: PathBuf,
    pub output: PathBuf,
    /// Names of the selected mesh objects, in selection order.
    pub objects: Vec<String>,
    pub seed: i64,
    pub params: WebParams,
    pub pool_size: usize,
    pub main_strands: usize,
    pub sub_strands: usize,
}

impl RunRecord {
    pub fn new(scene: &Scene, scene_path: &Path, output: &Path, params: &WebParams, summary: &WebSummary) -> Self {
        let objects = SpiderwebOperator::mesh_objects(scene)
            .into_iter()
            .filter_map(|id| scene.object(id).map(|o| o.name.clone()))
            .collect();
        Self {
            spiderweb_version: spiderweb::VERSION.to_string(),
            code_rev: option_env!("GIT_COMMIT")
                .filter(|rev| !rev.is_empty())
                .map(str::to_string),
            scene: scene_path.to_path_buf(),
            output: output.to_path_buf(),
            objects,
            seed: params.seed,
            params: params.clone(),
            pool_size: summary.pool_size,
            main_strands: summary.main_strands,
            sub_strands: summary.sub_strands,
        }
    }

    /// `web.json` -> `web.record.json`, same directory.
    pub fn path_for(output: &Path) -> PathBuf {
        let stem = output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| WEB_OBJECT_NAME.to_string());
        output.with_file_name(format!("{stem}.record.json"))
    }

    pub fn write(&self) -> Result<PathBuf> {
        let path = Self::path_for(&self.output);
        let text = serde_json::to_vec_pretty(self).context("serializing run record")?;
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}
