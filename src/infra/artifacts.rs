// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Persists what is needed to repeat a run or to encode new posts
// the same way as the training data:
//
//   artifacts/
//     pipeline_config.json   ← the PipelineConfig of the run
//     fitted_transform.json  ← TF-IDF vocabulary + IDF weights,
//                              profile classes, target column
//
// Both files are pretty-printed JSON written with serde_json.
// Loading a transform and calling FittedTransform::transform on a
// new table gives exactly the columns the models were trained on.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::application::pipeline_use_case::PipelineConfig;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::features::matrix::FittedTransform;

const CONFIG_FILE:    &str = "pipeline_config.json";
const TRANSFORM_FILE: &str = "fitted_transform.json";

/// Reads and writes run artifacts inside one directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// The directory is created on first save, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_config(&self, cfg: &PipelineConfig) -> PipelineResult<PathBuf> {
        self.write_json(CONFIG_FILE, cfg)
    }

    pub fn load_config(&self) -> PipelineResult<PipelineConfig> {
        self.read_json(CONFIG_FILE)
    }

    pub fn save_transform(&self, transform: &FittedTransform) -> PipelineResult<PathBuf> {
        self.write_json(TRANSFORM_FILE, transform)
    }

    /// Errors with DataAccess if the run never saved a transform.
    pub fn load_transform(&self) -> PipelineResult<FittedTransform> {
        self.read_json(TRANSFORM_FILE)
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> PipelineResult<PathBuf> {
        let path = self.dir.join(file);
        fs::create_dir_all(&self.dir).map_err(|e| PipelineError::output(&self.dir, e))?;

        let json = serde_json::to_string_pretty(value).map_err(|e| PipelineError::output(&path, e))?;
        fs::write(&path, json).map_err(|e| PipelineError::output(&path, e))?;

        tracing::debug!("Saved artifact '{}'", path.display());
        Ok(path)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> PipelineResult<T> {
        let path = self.dir.join(file);
        let json = fs::read_to_string(&path).map_err(|e| PipelineError::data_access(&path, e))?;
        serde_json::from_str(&json).map_err(|e| PipelineError::data_access(&path, e))
    }
}
