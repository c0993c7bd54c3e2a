// ============================================================
// Layer 6 — Pipeline Parameters (params.yaml)
// ============================================================
// Loads the key-value settings document that drives the stages.
//
// Example params.yaml:
//
//   data_ingestion:
//     test_size: 0.2
//     random_state: 2          # optional, default 2
//
//   data_preprocessing:        # optional section
//     text_column: text
//     target_column: target
//     label_encoding: per_partition   # or: shared
//
// Only data_ingestion.test_size is mandatory, and only for the
// ingestion stage. Values are validated when loaded so a bad
// test_size stops the run before any data is fetched.
//
// Reference: serde / serde_yaml crate documentation

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::encoder::LabelEncoding;
use crate::data::schema::{TARGET_COLUMN, TEXT_COLUMN};
use crate::data::splitter::validate_test_size;
use crate::domain::error::PipelineError;

/// Seed used when params.yaml does not name one
pub const DEFAULT_RANDOM_STATE: u64 = 2;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Params {
    #[serde(default)]
    pub data_ingestion: Option<DataIngestionParams>,

    #[serde(default)]
    pub data_preprocessing: DataPreprocessingParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataIngestionParams {
    /// Fraction of rows that go to the test partition, in (0, 1)
    pub test_size: f64,

    #[serde(default = "default_random_state")]
    pub random_state: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataPreprocessingParams {
    pub text_column:    String,
    pub target_column:  String,
    pub label_encoding: LabelEncoding,
}

impl Default for DataPreprocessingParams {
    fn default() -> Self {
        Self {
            text_column:    TEXT_COLUMN.to_string(),
            target_column:  TARGET_COLUMN.to_string(),
            label_encoding: LabelEncoding::PerPartition,
        }
    }
}

fn default_random_state() -> u64 {
    DEFAULT_RANDOM_STATE
}

impl Params {
    /// Read and validate a params file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let yaml = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let params = Self::from_yaml(&yaml)?;
        tracing::debug!("Parameters retrieved from {}", path.display());
        Ok(params)
    }

    /// Like `load`, but a missing file yields the defaults.
    /// Used by stages that need no mandatory setting.
    pub fn load_or_default(path: &Path) -> Result<Self, PipelineError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No params file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, PipelineError> {
        let params: Params = serde_yaml::from_str(yaml)
            .map_err(|e| PipelineError::Parse(format!("params: {e}")))?;

        if let Some(ingestion) = &params.data_ingestion {
            validate_test_size(ingestion.test_size)?;
        }
        Ok(params)
    }

    /// The ingestion section, which the ingestion stage cannot run without.
    pub fn ingestion(&self) -> Result<&DataIngestionParams, PipelineError> {
        self.data_ingestion.as_ref().ok_or_else(|| {
            PipelineError::InvalidArgument("params: missing 'data_ingestion.test_size'".into())
        })
    }
}
