//! Loading of the model artifact.
//!
//! The artifact is read once per process and handed out as shared,
//! read-only data. Any failure to read, parse, or validate it surfaces as
//! [`EstimateError::ModelUnavailable`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{EstimateError, Result};
use crate::models::*;

/// File name of the model artifact inside the data directory.
pub const MODEL_FILE: &str = "launch_cost_model.json";

/// Artifact shipped with the repository, relative to the working directory.
pub const BUNDLED_MODEL_PATH: &str = "models/launch_cost_model.json";

#[derive(Debug, Clone)]
pub struct ModelStore {
    source: String,
    model: Arc<LinearModel>,
    encoding: Arc<EncodingTable>,
}

impl ModelStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| unavailable(&source, e))?;
        Self::parse(source, &content)
    }

    /// Open the first artifact found among [`ModelStore::default_paths`].
    pub fn open_default() -> Result<Self> {
        let candidates = Self::default_paths();
        match first_existing(&candidates) {
            Some(path) => Self::open(path),
            None => Err(unavailable(
                "default location",
                format!("no model artifact at any of {:?}", candidates),
            )),
        }
    }

    /// Default artifact locations, most preferred first: the platform data
    /// directory, then the bundled artifact under the working directory.
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dirs) = directories::ProjectDirs::from("", "", "launch-cost") {
            paths.push(dirs.data_dir().join(MODEL_FILE));
        }
        paths.push(PathBuf::from(BUNDLED_MODEL_PATH));
        paths
    }

    /// Parse an artifact held in memory.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse("inline".to_string(), json)
    }

    pub fn from_parts(model: LinearModel, encoding: EncodingTable) -> Self {
        Self {
            source: "inline".to_string(),
            model: Arc::new(model),
            encoding: Arc::new(encoding),
        }
    }

    fn parse(source: String, json: &str) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(|e| unavailable(&source, e))?;
        let (model, encoding) = artifact
            .into_parts()
            .map_err(|e| unavailable(&source, e))?;

        tracing::info!(
            source = %source,
            coefficients = ?model.coefficients(),
            intercept = model.intercept(),
            "Loaded launch cost model"
        );

        Ok(Self {
            source,
            model: Arc::new(model),
            encoding: Arc::new(encoding),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn model(&self) -> Arc<LinearModel> {
        Arc::clone(&self.model)
    }

    pub fn encoding(&self) -> Arc<EncodingTable> {
        Arc::clone(&self.encoding)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary::new(&self.source, &self.model)
    }
}

fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|path| path.is_file())
}

fn unavailable(source: &str, reason: impl std::fmt::Display) -> EstimateError {
    let err = EstimateError::ModelUnavailable {
        source_name: source.to_string(),
        reason: reason.to_string(),
    };
    tracing::error!("{}", err);
    err
}
