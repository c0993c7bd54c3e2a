// ============================================================
// Layer 2 — IngestUseCase
// ============================================================
// Orchestrates the ingestion stage in order:
//
//   Step 1: Load the raw CSV            (Layer 4 - data)
//   Step 2: Prune and rename columns    (Layer 4 - data)
//   Step 3: Seeded train/test split     (Layer 4 - data)
//   Step 4: Save raw/train.csv + test   (Layer 6 - infra)
//
// A failure at any step aborts the stage. Nothing is written
// before Step 4, and Step 4 writes the pair atomically.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::{loader::source_for, schema::prune_and_rename, splitter::split};
use crate::domain::traits::TableSource;
use crate::infra::artifacts::ArtifactStore;

// ─── Ingestion Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Local path or http(s) URL of the raw CSV
    pub source:    String,
    pub data_root: PathBuf,
    pub test_size: f64,
    pub seed:      u64,
}

/// Row counts of the written partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub train_rows: usize,
    pub test_rows:  usize,
}

// ─── IngestUseCase ────────────────────────────────────────────────────────────
pub struct IngestUseCase {
    config: IngestConfig,
    source: Box<dyn TableSource>,
}

impl IngestUseCase {
    /// Build the use case, picking the source from the config's location.
    pub fn new(config: IngestConfig) -> Self {
        let source = source_for(&config.source);
        Self::with_source(config, source)
    }

    /// Build the use case around an already constructed source.
    pub fn with_source(config: IngestConfig, source: Box<dyn TableSource>) -> Self {
        Self { config, source }
    }

    pub fn execute(&self) -> Result<IngestSummary> {
        let cfg = &self.config;

        // ── Step 1: Load the raw table ────────────────────────────────────────
        tracing::info!("Loading raw data from '{}'", self.source.describe());
        let raw = self
            .source
            .load()
            .with_context(|| format!("loading raw data from '{}'", self.source.describe()))?;
        tracing::info!("Loaded {} rows, columns {:?}", raw.len(), raw.columns());

        // ── Step 2: Keep only target/text ─────────────────────────────────────
        let table = prune_and_rename(raw).context("preparing raw columns")?;
        tracing::debug!("Data preprocessing completed");

        // ── Step 3: Train / test split ────────────────────────────────────────
        let (train, test) = split(&table, cfg.test_size, cfg.seed).context("splitting data")?;
        tracing::info!(
            "Split: {} train, {} test (test_size={}, seed={})",
            train.len(),
            test.len(),
            cfg.test_size,
            cfg.seed
        );

        // ── Step 4: Persist both partitions ───────────────────────────────────
        let store = ArtifactStore::new(&cfg.data_root);
        store
            .save_raw(&train, &test)
            .with_context(|| format!("saving partitions under '{}'", store.raw_dir().display()))?;
        tracing::info!("Raw partitions written to '{}'", store.raw_dir().display());

        Ok(IngestSummary {
            train_rows: train.len(),
            test_rows:  test.len(),
        })
    }
}
