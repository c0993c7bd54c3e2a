// ============================================================
// Layer 4 — Label Encoder
// ============================================================
// Maps categorical label values to dense integer codes.
//
// Codes are positions in the SORTED list of distinct labels:
//   {"spam", "ham"} → ham = 0, spam = 1
//
// The encoder is fitted on one table's observed labels. By
// default each partition is fitted on its own (per-partition
// encoding), which means train and test can disagree on what a
// code means when their label sets differ. The Shared mode fits
// on train and reuses that mapping for test instead.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::domain::error::PipelineError;
use crate::domain::table::Table;

/// How partitions obtain their label mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelEncoding {
    /// Every partition builds its own mapping from its own labels
    #[default]
    PerPartition,
    /// Train's mapping is reused for test
    Shared,
}

/// A fitted label → code mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
    codes:   HashMap<String, usize>,
}

impl LabelEncoder {
    /// Fit on the distinct values of `column`. Missing labels
    /// cannot be ordered against strings and are rejected.
    pub fn fit(table: &Table, column: &str) -> Result<Self, PipelineError> {
        let idx = table.require_column(column)?;

        let mut distinct = BTreeSet::new();
        for (row_no, row) in table.rows().iter().enumerate() {
            match &row[idx] {
                Some(v) => {
                    distinct.insert(v.clone());
                }
                None => {
                    return Err(PipelineError::Transform(format!(
                        "missing value in '{column}' at row {row_no}"
                    )))
                }
            }
        }

        let classes: Vec<String> = distinct.into_iter().collect();
        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code))
            .collect();

        Ok(Self { classes, codes })
    }

    /// Labels in code order: `classes()[code]` is the label for `code`
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn code_of(&self, label: &str) -> Option<usize> {
        self.codes.get(label).copied()
    }

    /// Replace every value of `column` with its integer code.
    pub fn transform(&self, table: &mut Table, column: &str) -> Result<(), PipelineError> {
        let idx = table.require_column(column)?;

        for (row_no, cell) in table.column_mut(idx).enumerate() {
            let label = cell.as_deref().ok_or_else(|| {
                PipelineError::Transform(format!("missing value in '{column}' at row {row_no}"))
            })?;
            let code = self.code_of(label).ok_or_else(|| {
                PipelineError::Transform(format!(
                    "label '{label}' in '{column}' at row {row_no} was not seen when fitting"
                ))
            })?;
            *cell = Some(code.to_string());
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Table {
        let mut t = Table::new(["target", "text"]);
        for (i, v) in values.iter().enumerate() {
            t.push_row(vec![Some(v.to_string()), Some(format!("m{i}"))])
                .unwrap();
        }
        t
    }

    fn targets(t: &Table) -> Vec<String> {
        t.rows().iter().map(|r| r[0].clone().unwrap()).collect()
    }

    #[test]
    fn test_codes_follow_sorted_labels() {
        let mut t = labels(&["spam", "ham", "ham", "spam"]);
        let enc   = LabelEncoder::fit(&t, "target").unwrap();
        assert_eq!(enc.classes(), &["ham", "spam"]);

        enc.transform(&mut t, "target").unwrap();
        assert_eq!(targets(&t), vec!["1", "0", "0", "1"]);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let t   = labels(&["ham"]);
        let err = LabelEncoder::fit(&t, "label").unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn test_missing_label_is_transform_error() {
        let mut t = labels(&["ham"]);
        t.push_row(vec![None, Some("x".into())]).unwrap();
        let err = LabelEncoder::fit(&t, "target").unwrap_err();
        assert!(matches!(err, PipelineError::Transform(_)));
    }

    #[test]
    fn test_unseen_label_is_transform_error() {
        let enc   = LabelEncoder::fit(&labels(&["ham"]), "target").unwrap();
        let mut t = labels(&["spam"]);
        let err   = enc.transform(&mut t, "target").unwrap_err();
        assert!(matches!(err, PipelineError::Transform(_)));
    }

    #[test]
    fn test_per_partition_fitting_can_misalign_codes() {
        // Train sees both labels, test only sees spam.
        let train = labels(&["ham", "spam", "ham"]);
        let test  = labels(&["spam", "spam"]);

        let train_enc = LabelEncoder::fit(&train, "target").unwrap();
        let test_enc  = LabelEncoder::fit(&test, "target").unwrap();

        // The same label gets a different code in each partition.
        assert_eq!(train_enc.code_of("spam"), Some(1));
        assert_eq!(test_enc.code_of("spam"), Some(0));
    }
}
