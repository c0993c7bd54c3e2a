// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Orchestrates the preprocessing stage in order:
//
//   Step 1: Load raw/train.csv and raw/test.csv    (Layer 4 - data)
//   Step 2: Fit the label encoder(s)               (Layer 4 - data)
//   Step 3: Encode, dedupe, normalise each side    (Layer 4 - data)
//   Step 4: Save Interim/*_processed.csv           (Layer 6 - infra)
//
// Label encoding modes:
//   PerPartition — train and test each fit their own encoder
//   Shared       — the train encoder is reused for test
//
// Reference: Rust Book §9 (Error Handling with anyhow)

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::{
    encoder::{LabelEncoder, LabelEncoding},
    loader::load_partition,
    normalizer::TextNormalizer,
    preprocessor::{PreprocessReport, Preprocessor},
    stemmer::StemmerKind,
};
use crate::domain::table::Table;
use crate::domain::Partition;
use crate::infra::artifacts::ArtifactStore;

// ─── Preprocessing Configuration ──────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    pub data_root:      PathBuf,
    pub text_column:    String,
    pub target_column:  String,
    pub label_encoding: LabelEncoding,
    pub stemmer:        StemmerKind,
}

/// Per-partition reports of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessSummary {
    pub train: PreprocessReport,
    pub test:  PreprocessReport,
}

// ─── PreprocessUseCase ────────────────────────────────────────────────────────
pub struct PreprocessUseCase {
    config:       PreprocessConfig,
    preprocessor: Preprocessor,
}

impl PreprocessUseCase {
    pub fn new(config: PreprocessConfig) -> Self {
        let normalizer = TextNormalizer::with_kind(config.stemmer);
        tracing::debug!("Normalising with the {} stemmer", normalizer.stemmer_name());

        let preprocessor = Preprocessor::new(
            normalizer,
            config.text_column.clone(),
            config.target_column.clone(),
        );
        Self { config, preprocessor }
    }

    pub fn execute(&self) -> Result<PreprocessSummary> {
        let cfg   = &self.config;
        let store = ArtifactStore::new(&cfg.data_root);

        // ── Step 1: Load both raw partitions ──────────────────────────────────
        let train = self.load(&store, Partition::Train)?;
        let test  = self.load(&store, Partition::Test)?;
        tracing::info!(
            "Loaded {} train and {} test rows (stemmer={:?}, label_encoding={:?})",
            train.len(),
            test.len(),
            cfg.stemmer,
            cfg.label_encoding
        );

        // ── Step 2 + 3: Encode, dedupe, normalise ─────────────────────────────
        let (train_out, test_out, summary) = match cfg.label_encoding {
            LabelEncoding::PerPartition => {
                let (train_out, train_report) = self.run(Partition::Train, train, None)?;
                let (test_out, test_report)   = self.run(Partition::Test, test, None)?;
                (train_out, test_out, PreprocessSummary { train: train_report, test: test_report })
            }
            LabelEncoding::Shared => {
                let encoder = LabelEncoder::fit(&train, self.preprocessor.target_column())
                    .context("fitting label encoder on train")?;
                let (train_out, train_report) =
                    self.run(Partition::Train, train, Some(&encoder))?;
                let (test_out, test_report) = self.run(Partition::Test, test, Some(&encoder))?;
                (train_out, test_out, PreprocessSummary { train: train_report, test: test_report })
            }
        };

        // ── Step 4: Persist both partitions ───────────────────────────────────
        store
            .save_processed(&train_out, &test_out)
            .with_context(|| {
                format!("saving processed data under '{}'", store.interim_dir().display())
            })?;
        tracing::info!("Processed partitions written to '{}'", store.interim_dir().display());

        Ok(summary)
    }

    fn load(&self, store: &ArtifactStore, partition: Partition) -> Result<Table> {
        let path  = store.raw_path(partition);
        let table = load_partition(&path)
            .with_context(|| format!("loading {partition} partition from '{}'", path.display()))?;
        tracing::debug!("Data loaded from {}", path.display());
        Ok(table)
    }

    fn run(
        &self,
        partition: Partition,
        table:     Table,
        encoder:   Option<&LabelEncoder>,
    ) -> Result<(Table, PreprocessReport)> {
        let result = match encoder {
            Some(encoder) => self.preprocessor.preprocess_with(table, encoder),
            None          => self.preprocessor.preprocess(table),
        };
        let (table, report) = result.with_context(|| format!("preprocessing {partition} data"))?;

        tracing::info!(
            "{}: {} rows in, {} duplicates dropped, {} rows out",
            partition,
            report.rows_in,
            report.duplicates_dropped,
            report.rows_out
        );
        if report.empty_texts > 0 {
            tracing::warn!(
                "{}: {} messages normalised to empty text",
                partition,
                report.empty_texts
            );
        }
        Ok((table, report))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use crate::domain::error::PipelineError;

    fn config(root: &Path, label_encoding: LabelEncoding) -> PreprocessConfig {
        PreprocessConfig {
            data_root:      root.to_path_buf(),
            text_column:    "text".to_string(),
            target_column:  "target".to_string(),
            label_encoding,
            stemmer:        StemmerKind::Porter,
        }
    }

    fn write_raw(root: &Path, train: &str, test: &str) -> ArtifactStore {
        let store = ArtifactStore::new(root);
        fs::create_dir_all(store.raw_dir()).unwrap();
        fs::write(store.raw_path(Partition::Train), train).unwrap();
        fs::write(store.raw_path(Partition::Test), test).unwrap();
        store
    }

    #[test]
    fn test_writes_processed_partitions() {
        let dir   = tempfile::tempdir().unwrap();
        let store = write_raw(
            dir.path(),
            "target,text\nspam,WIN cash now\nham,ok\nham,ok\nspam,Claim your prize\n",
            "target,text\nham,See you tomorrow\nspam,\"WIN a FREE iPhone!! Call 1-800-555-0100 now.\"\n",
        );

        let summary = PreprocessUseCase::new(config(dir.path(), LabelEncoding::PerPartition))
            .execute()
            .unwrap();
        assert_eq!(summary.train.duplicates_dropped, 1);
        assert_eq!(summary.test.rows_out, 2);

        let train = fs::read_to_string(store.processed_path(Partition::Train)).unwrap();
        assert_eq!(train, "target,text\n1,win cash\n0,ok\n1,claim prize\n");

        let test = fs::read_to_string(store.processed_path(Partition::Test)).unwrap();
        assert_eq!(test, "target,text\n0,see tomorrow\n1,win free iphon call\n");
    }

    #[test]
    fn test_shared_encoding_aligns_test_codes() {
        let dir   = tempfile::tempdir().unwrap();
        let store = write_raw(
            dir.path(),
            "target,text\nham,hi\nspam,free prize\n",
            "target,text\nspam,win cash\n",
        );

        PreprocessUseCase::new(config(dir.path(), LabelEncoding::Shared))
            .execute()
            .unwrap();

        let test = fs::read_to_string(store.processed_path(Partition::Test)).unwrap();
        assert_eq!(test, "target,text\n1,win cash\n");
    }

    #[test]
    fn test_shared_encoding_rejects_unseen_label() {
        let dir = tempfile::tempdir().unwrap();
        write_raw(
            dir.path(),
            "target,text\nham,hi\n",
            "target,text\nspam,win cash\n",
        );

        let err = PreprocessUseCase::new(config(dir.path(), LabelEncoding::Shared))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Transform(_))
        ));
    }

    #[test]
    fn test_header_only_partition_is_empty_data() {
        let dir   = tempfile::tempdir().unwrap();
        let store = write_raw(dir.path(), "target,text\nham,hi\n", "target,text\n");

        let err = PreprocessUseCase::new(config(dir.path(), LabelEncoding::PerPartition))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::EmptyData(_))
        ));
        assert!(!store.processed_path(Partition::Train).exists());
    }

    #[test]
    fn test_missing_raw_partition_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = PreprocessUseCase::new(config(dir.path(), LabelEncoding::PerPartition))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Io { .. })
        ));
    }
}
