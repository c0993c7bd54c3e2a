// ============================================================
// Layer 4 — Partition Preprocessor
// ============================================================
// Transforms one ingested partition (train or test) into its
// model-ready form.
//
// Steps (applied in order):
//   1. Encode the target column to integer codes
//   2. Drop exact duplicate rows, keeping the first occurrence
//   3. Replace every text value with its normalised form
//
// Deduplication runs AFTER encoding and compares whole rows, so
// two rows are duplicates only if both the label and the raw
// message match. It runs BEFORE normalisation, so messages that
// only become equal once normalised are all kept.
//
// Any value that cannot be transformed (a missing label or
// message) aborts the partition with a TransformError.

use std::collections::HashSet;

use crate::data::encoder::LabelEncoder;
use crate::data::normalizer::TextNormalizer;
use crate::domain::error::PipelineError;
use crate::domain::table::{Cell, Table};

/// Counts reported after a partition has been preprocessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreprocessReport {
    pub rows_in:            usize,
    pub duplicates_dropped: usize,
    pub rows_out:           usize,
    /// Rows whose text normalised to the empty string
    pub empty_texts:        usize,
}

pub struct Preprocessor {
    normalizer:    TextNormalizer,
    text_column:   String,
    target_column: String,
}

impl Preprocessor {
    pub fn new(
        normalizer:    TextNormalizer,
        text_column:   impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            normalizer,
            text_column:   text_column.into(),
            target_column: target_column.into(),
        }
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Fit a fresh encoder on this table's own labels, then run
    /// the full transformation.
    pub fn preprocess(&self, table: Table) -> Result<(Table, PreprocessReport), PipelineError> {
        let encoder = LabelEncoder::fit(&table, &self.target_column)?;
        self.preprocess_with(table, &encoder)
    }

    /// Run the full transformation with an already fitted encoder.
    pub fn preprocess_with(
        &self,
        mut table: Table,
        encoder:   &LabelEncoder,
    ) -> Result<(Table, PreprocessReport), PipelineError> {
        let text_idx = table.require_column(&self.text_column)?;
        table.require_column(&self.target_column)?;

        let rows_in = table.len();
        tracing::debug!("Starting preprocessing for table with {} rows", rows_in);

        // ── Step 1: Encode the target column ─────────────────────────────────
        encoder.transform(&mut table, &self.target_column)?;
        tracing::debug!(
            "Target column encoded: {:?}",
            encoder
                .classes()
                .iter()
                .enumerate()
                .map(|(code, label)| format!("{label}={code}"))
                .collect::<Vec<_>>()
        );

        // ── Step 2: Remove duplicate rows ─────────────────────────────────────
        let duplicates_dropped = drop_duplicates(&mut table);
        tracing::debug!("Duplicates removed: {}", duplicates_dropped);

        // ── Step 3: Normalise the text column ─────────────────────────────────
        let mut empty_texts = 0;
        for (row_no, cell) in table.column_mut(text_idx).enumerate() {
            let raw = cell.as_deref().ok_or_else(|| {
                PipelineError::Transform(format!(
                    "missing value in '{}' at row {row_no}",
                    self.text_column
                ))
            })?;
            let normalized = self.normalizer.normalize(raw);
            if normalized.is_empty() {
                empty_texts += 1;
            }
            *cell = Some(normalized);
        }
        tracing::debug!("Text column transformed");

        let report = PreprocessReport {
            rows_in,
            duplicates_dropped,
            rows_out: table.len(),
            empty_texts,
        };
        Ok((table, report))
    }
}

/// Keep the first occurrence of every distinct row, preserving
/// order. Returns how many rows were removed.
pub fn drop_duplicates(table: &mut Table) -> usize {
    let before = table.len();
    let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(before);
    table.retain_rows(|row| seen.insert(row.clone()));
    before - table.len()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> Table {
        let mut t = Table::new(["target", "text"]);
        for (target, text) in rows {
            t.push_row(vec![Some(target.to_string()), Some(text.to_string())])
                .unwrap();
        }
        t
    }

    fn preprocessor() -> Preprocessor {
        Preprocessor::new(TextNormalizer::default(), "text", "target")
    }

    fn cells(t: &Table, col: usize) -> Vec<&str> {
        t.rows().iter().map(|r| r[col].as_deref().unwrap()).collect()
    }

    #[test]
    fn test_encode_dedupe_normalise() {
        let input = table(&[
            ("spam", "WIN cash now"),
            ("ham", "ok"),
            ("ham", "ok"),
            ("spam", "Claim your prize"),
        ]);

        let (out, report) = preprocessor().preprocess(input).unwrap();

        // Exactly one ("ham", "ok") survives
        assert_eq!(out.len(), 3);
        assert_eq!(report.duplicates_dropped, 1);
        assert_eq!(report.rows_in, 4);
        assert_eq!(report.rows_out, 3);

        // ham → 0, spam → 1, consistently for every row
        assert_eq!(cells(&out, 0), vec!["1", "0", "1"]);
        assert_eq!(cells(&out, 1), vec!["win cash", "ok", "claim prize"]);
    }

    #[test]
    fn test_dedupe_keeps_first_and_leaves_others_untouched() {
        let mut t = table(&[
            ("a", "1"),
            ("b", "2"),
            ("a", "1"),
            ("c", "3"),
            ("b", "2"),
            ("b", "2"),
        ]);
        let dropped = drop_duplicates(&mut t);
        assert_eq!(dropped, 3);
        assert_eq!(cells(&t, 0), vec!["a", "b", "c"]);
        assert_eq!(cells(&t, 1), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_same_text_different_label_is_not_duplicate() {
        let input = table(&[("spam", "hello"), ("ham", "hello")]);
        let (out, report) = preprocessor().preprocess(input).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(report.duplicates_dropped, 0);
    }

    #[test]
    fn test_duplicates_only_after_normalising_are_kept() {
        // Equal once normalised, different as raw text
        let input = table(&[("ham", "Running"), ("ham", "running!")]);
        let (out, _) = preprocessor().preprocess(input).unwrap();
        assert_eq!(cells(&out, 1), vec!["run", "run"]);
    }

    #[test]
    fn test_empty_texts_are_counted() {
        let input = table(&[("ham", "the and is"), ("spam", "free")]);
        let (out, report) = preprocessor().preprocess(input).unwrap();
        assert_eq!(report.empty_texts, 1);
        assert_eq!(cells(&out, 1), vec!["", "free"]);
    }

    #[test]
    fn test_missing_text_column_is_schema_error() {
        let t = table(&[("ham", "ok")]);
        let p = Preprocessor::new(TextNormalizer::default(), "message", "target");
        assert!(matches!(p.preprocess(t).unwrap_err(), PipelineError::Schema(_)));
    }

    #[test]
    fn test_missing_target_column_is_schema_error() {
        let t = table(&[("ham", "ok")]);
        let p = Preprocessor::new(TextNormalizer::default(), "text", "label");
        assert!(matches!(p.preprocess(t).unwrap_err(), PipelineError::Schema(_)));
    }

    #[test]
    fn test_missing_text_value_is_transform_error() {
        let mut t = table(&[("ham", "ok")]);
        t.push_row(vec![Some("spam".into()), None]).unwrap();
        let err = preprocessor().preprocess(t).unwrap_err();
        assert!(matches!(err, PipelineError::Transform(_)));
    }

    #[test]
    fn test_partitions_are_encoded_independently() {
        // The test partition happens to contain only spam.
        let train = table(&[("ham", "hi"), ("spam", "free prize")]);
        let test  = table(&[("spam", "win cash"), ("spam", "claim now")]);

        let p = preprocessor();
        let (train_out, _) = p.preprocess(train).unwrap();
        let (test_out, _)  = p.preprocess(test).unwrap();

        // spam is 1 in train but 0 in test
        assert_eq!(cells(&train_out, 0), vec!["0", "1"]);
        assert_eq!(cells(&test_out, 0), vec!["0", "0"]);
    }

    #[test]
    fn test_shared_encoder_keeps_codes_aligned() {
        let train = table(&[("ham", "hi"), ("spam", "free prize")]);
        let test  = table(&[("spam", "win cash")]);

        let p       = preprocessor();
        let encoder = LabelEncoder::fit(&train, p.target_column()).unwrap();
        let (test_out, _) = p.preprocess_with(test, &encoder).unwrap();
        assert_eq!(cells(&test_out, 0), vec!["1"]);
    }
}
