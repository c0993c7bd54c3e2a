// ============================================================
// Layer 4 — Canonical Schema
// ============================================================
// Turns a raw spam.csv table into the two-column canonical
// shape every later stage assumes:
//
//   v1, v2, Unnamed: 2, Unnamed: 3, Unnamed: 4
//       │
//       ▼  drop junk columns, rename v1/v2
//   target, text
//
// A missing source column is a hard stop (SchemaError), never
// a warning. Extra columns beyond the known junk set are
// tolerated and discarded so the output is always exactly
// [target, text] in that order.

use crate::domain::error::PipelineError;
use crate::domain::table::Table;

pub const TARGET_COLUMN: &str = "target";
pub const TEXT_COLUMN: &str = "text";

/// Columns the raw corpus carries that hold no information
pub const JUNK_COLUMNS: [&str; 3] = ["Unnamed: 2", "Unnamed: 3", "Unnamed: 4"];

/// Raw label column → target, raw message column → text
pub const RENAMES: [(&str, &str); 2] = [("v1", TARGET_COLUMN), ("v2", TEXT_COLUMN)];

/// Drop the known junk columns and rename the two informative ones.
pub fn prune_and_rename(mut table: Table) -> Result<Table, PipelineError> {
    table.drop_columns(&JUNK_COLUMNS)?;
    table.rename_columns(&RENAMES)?;

    let canonical = table.select_columns(&[TARGET_COLUMN, TEXT_COLUMN])?;

    tracing::debug!(
        "Schema pruned to [{}, {}] over {} rows",
        TARGET_COLUMN,
        TEXT_COLUMN,
        canonical.len()
    );
    Ok(canonical)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn raw(columns: &[&str]) -> Table {
        let mut t = Table::new(columns.iter().copied());
        let row = columns.iter().map(|c| Some(format!("{c}-value"))).collect();
        t.push_row(row).unwrap();
        t
    }

    #[test]
    fn test_yields_exactly_target_and_text() {
        let t = prune_and_rename(raw(&["v1", "v2", "Unnamed: 2", "Unnamed: 3", "Unnamed: 4"]))
            .unwrap();
        assert_eq!(t.columns(), &["target", "text"]);
        assert_eq!(t.rows()[0][0].as_deref(), Some("v1-value"));
        assert_eq!(t.rows()[0][1].as_deref(), Some("v2-value"));
    }

    #[test]
    fn test_order_and_extras_do_not_matter() {
        let t = prune_and_rename(raw(&[
            "extra_a",
            "Unnamed: 4",
            "v2",
            "Unnamed: 2",
            "extra_b",
            "v1",
            "Unnamed: 3",
        ]))
        .unwrap();
        assert_eq!(t.columns(), &["target", "text"]);
        assert_eq!(t.rows()[0][0].as_deref(), Some("v1-value"));
        assert_eq!(t.rows()[0][1].as_deref(), Some("v2-value"));
    }

    #[test]
    fn test_missing_label_column_is_schema_error() {
        let err = prune_and_rename(raw(&["v2", "Unnamed: 2", "Unnamed: 3", "Unnamed: 4"]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn test_missing_junk_column_is_schema_error() {
        let err = prune_and_rename(raw(&["v1", "v2", "Unnamed: 2"])).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }
}
