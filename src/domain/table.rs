// ============================================================
// Layer 3 — Table Domain Type
// ============================================================
// An in-memory, fully materialised table of string cells.
//
// Every stage of the pipeline reads a whole Table, transforms
// it, and hands the finished Table to the next stage. There is
// no streaming and no shared mutable state between stages.
//
// Cells are Option<String>:
//   - Some(s) → a value read from the CSV (possibly "0", "spam", ...)
//   - None    → a missing value (an empty CSV field)
//
// Column names are kept in a separate Vec so that renaming or
// dropping a column never has to touch the row data twice.
//
// Reference: Rust Book §8 (Vectors), §5 (Structs and Methods)

use crate::domain::error::PipelineError;

/// One cell of a table. `None` marks a missing value.
pub type Cell = Option<String>;

/// A rectangular table: named columns and rows of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Column names in display order
    columns: Vec<String>,

    /// Row data; every row has exactly `columns.len()` cells
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows:    Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with missing cells and
    /// long rows are rejected, so the table always stays rectangular.
    pub fn push_row(&mut self, mut row: Vec<Cell>) -> Result<(), PipelineError> {
        if row.len() > self.columns.len() {
            return Err(PipelineError::Parse(format!(
                "row {} has {} fields but the header has {}",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        row.resize(self.columns.len(), None);
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of data rows (the header is not counted)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index` but a missing column is a schema error.
    pub fn require_column(&self, name: &str) -> Result<usize, PipelineError> {
        self.column_index(name)
            .ok_or_else(|| PipelineError::Schema(format!("column '{name}' not found")))
    }

    /// Remove the named columns. Every name must exist — a missing
    /// column is surfaced as a SchemaError rather than ignored.
    pub fn drop_columns(&mut self, names: &[&str]) -> Result<(), PipelineError> {
        let mut doomed = Vec::with_capacity(names.len());
        for name in names {
            doomed.push(self.require_column(name)?);
        }
        self.retain_columns(|idx, _| !doomed.contains(&idx));
        Ok(())
    }

    /// Keep only the named columns, in the order given.
    pub fn select_columns(&self, names: &[&str]) -> Result<Table, PipelineError> {
        let indices = names
            .iter()
            .map(|n| self.require_column(n))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows:    self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Rename columns `from → to`. Every `from` must exist.
    pub fn rename_columns(&mut self, mapping: &[(&str, &str)]) -> Result<(), PipelineError> {
        let mut resolved = Vec::with_capacity(mapping.len());
        for (from, to) in mapping {
            resolved.push((self.require_column(from)?, *to));
        }
        for (idx, to) in resolved {
            self.columns[idx] = to.to_string();
        }
        Ok(())
    }

    /// Build a new table from the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows:    indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Mutable access to one column's cells, row by row.
    pub fn column_mut(&mut self, idx: usize) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().map(move |row| &mut row[idx])
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Vec<Cell>) -> bool,
    {
        self.rows.retain(keep);
    }

    fn retain_columns<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, &str) -> bool,
    {
        let mask: Vec<bool> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| keep(i, c.as_str()))
            .collect();

        let mut i = 0;
        self.columns.retain(|_| {
            i += 1;
            mask[i - 1]
        });

        for row in &mut self.rows {
            let mut j = 0;
            row.retain(|_| {
                j += 1;
                mask[j - 1]
            });
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        Some(s.to_string())
    }

    fn sample() -> Table {
        let mut t = Table::new(["a", "b", "c"]);
        t.push_row(vec![cell("1"), cell("2"), cell("3")]).unwrap();
        t.push_row(vec![cell("4"), cell("5")]).unwrap();
        t
    }

    #[test]
    fn test_short_rows_are_padded() {
        let t = sample();
        assert_eq!(t.rows()[1], vec![cell("4"), cell("5"), None]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let mut t = Table::new(["a"]);
        let err   = t.push_row(vec![cell("1"), cell("2")]).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn test_drop_columns() {
        let mut t = sample();
        t.drop_columns(&["b"]).unwrap();
        assert_eq!(t.columns(), &["a".to_string(), "c".to_string()]);
        assert_eq!(t.rows()[0], vec![cell("1"), cell("3")]);
    }

    #[test]
    fn test_drop_missing_column_is_schema_error() {
        let mut t = sample();
        let err   = t.drop_columns(&["zzz"]).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
        // Nothing was removed
        assert_eq!(t.columns().len(), 3);
    }

    #[test]
    fn test_rename_and_select() {
        let mut t = sample();
        t.rename_columns(&[("a", "x"), ("c", "z")]).unwrap();
        let s = t.select_columns(&["z", "x"]).unwrap();
        assert_eq!(s.columns(), &["z".to_string(), "x".to_string()]);
        assert_eq!(s.rows()[0], vec![cell("3"), cell("1")]);
    }

    #[test]
    fn test_select_rows_in_given_order() {
        let t = sample();
        let s = t.select_rows(&[1, 0]);
        assert_eq!(s.rows()[0][0], cell("4"));
        assert_eq!(s.rows()[1][0], cell("1"));
    }
}
