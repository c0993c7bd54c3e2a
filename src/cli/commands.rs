// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and their flags:
//
//   ingest      — fetch the raw CSV, split it, write raw/
//   preprocess  — encode, dedupe, normalise raw/ into Interim/
//   run         — ingest, then preprocess
//   normalize   — print the normalised form of one message
//
// Settings are layered: params.yaml supplies the pipeline
// parameters and a flag, when given, overrides its value.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::application::ingest_use_case::IngestConfig;
use crate::application::preprocess_use_case::PreprocessConfig;
use crate::data::encoder::LabelEncoding;
use crate::data::stemmer::StemmerKind;
use crate::infra::params::Params;

/// Public copy of the SMS spam collection
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/vikashishere/Datasets/refs/heads/main/spam.csv";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the raw corpus, split it, and write data/raw/
    Ingest(IngestArgs),

    /// Encode, dedupe, and normalise data/raw/ into data/Interim/
    Preprocess(PreprocessArgs),

    /// Run ingestion followed by preprocessing
    Run(RunArgs),

    /// Print the normalised form of a single message
    Normalize(NormalizeArgs),
}

/// Flags shared by every pipeline stage
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the params.yaml settings file
    #[arg(long, default_value = "params.yaml")]
    pub params: PathBuf,

    /// Root directory holding raw/ and Interim/
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct IngestOptions {
    /// Local path or http(s) URL of the raw CSV
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Shuffle seed; overrides data_ingestion.random_state
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct PreprocessOptions {
    /// Stemming algorithm applied to every token
    #[arg(long, value_enum)]
    pub stemmer: Option<StemmerArg>,

    /// How train and test obtain their label codes;
    /// overrides data_preprocessing.label_encoding
    #[arg(long, value_enum)]
    pub label_encoding: Option<LabelEncodingArg>,
}

#[derive(Args, Debug)]
pub struct IngestArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub options: IngestOptions,
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub options: PreprocessOptions,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub ingest: IngestOptions,

    #[command(flatten)]
    pub preprocess: PreprocessOptions,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// The message to normalise
    pub text: String,

    #[arg(long, value_enum, default_value_t = StemmerArg::Porter)]
    pub stemmer: StemmerArg,
}

// ─── Value enums ──────────────────────────────────────────────────────────────
// Kept separate from the Layer 4 enums so clap stays out of
// the data layer.

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemmerArg {
    Porter,
    Snowball,
}

impl From<StemmerArg> for StemmerKind {
    fn from(a: StemmerArg) -> Self {
        match a {
            StemmerArg::Porter   => StemmerKind::Porter,
            StemmerArg::Snowball => StemmerKind::Snowball,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelEncodingArg {
    PerPartition,
    Shared,
}

impl From<LabelEncodingArg> for LabelEncoding {
    fn from(a: LabelEncodingArg) -> Self {
        match a {
            LabelEncodingArg::PerPartition => LabelEncoding::PerPartition,
            LabelEncodingArg::Shared       => LabelEncoding::Shared,
        }
    }
}

// ─── Args → application config ────────────────────────────────────────────────
// The application layer never sees clap types.

impl IngestOptions {
    /// Fails when params.yaml has no data_ingestion section.
    pub fn to_config(&self, common: &CommonArgs, params: &Params) -> Result<IngestConfig> {
        let ingestion = params.ingestion()?;
        Ok(IngestConfig {
            source:    self.source.clone(),
            data_root: common.data_root.clone(),
            test_size: ingestion.test_size,
            seed:      self.seed.unwrap_or(ingestion.random_state),
        })
    }
}

impl PreprocessOptions {
    pub fn to_config(&self, common: &CommonArgs, params: &Params) -> PreprocessConfig {
        let prep = &params.data_preprocessing;
        PreprocessConfig {
            data_root:      common.data_root.clone(),
            text_column:    prep.text_column.clone(),
            target_column:  prep.target_column.clone(),
            label_encoding: self
                .label_encoding
                .map(LabelEncoding::from)
                .unwrap_or(prep.label_encoding),
            stemmer:        self.stemmer.map(StemmerKind::from).unwrap_or_default(),
        }
    }
}
