// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Owns the on-disk layout under the data root and writes the
// train/test CSV pairs.
//
// File layout:
//   <data_root>/
//     raw/
//       train.csv              ← ingestion output
//       test.csv
//     Interim/
//       train_processed.csv    ← preprocessing output
//       test_processed.csv
//
// Every file has a header row and no index column.
//
// Pair writes are all-or-nothing:
//   1. Both tables are written to temp files in the target dir
//   2. Only when both are complete are they renamed into place
//   3. If the second rename fails the first file is removed
// A failed run therefore never leaves a half-written file or a
// fresh train.csv next to a stale test.csv.
//
// Reference: tempfile crate (NamedTempFile::persist)
//            csv crate (Writer)

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::error::PipelineError;
use crate::domain::table::Table;
use crate::domain::Partition;

pub const RAW_DIR: &str = "raw";
pub const INTERIM_DIR: &str = "Interim";

/// Paths and writers for everything under one data root.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join(RAW_DIR)
    }

    pub fn interim_dir(&self) -> PathBuf {
        self.root.join(INTERIM_DIR)
    }

    /// `<root>/raw/<partition>.csv`
    pub fn raw_path(&self, partition: Partition) -> PathBuf {
        self.raw_dir().join(format!("{partition}.csv"))
    }

    /// `<root>/Interim/<partition>_processed.csv`
    pub fn processed_path(&self, partition: Partition) -> PathBuf {
        self.interim_dir().join(format!("{partition}_processed.csv"))
    }

    /// Persist the ingestion split.
    pub fn save_raw(&self, train: &Table, test: &Table) -> Result<(), PipelineError> {
        write_pair(
            &self.raw_path(Partition::Train),
            train,
            &self.raw_path(Partition::Test),
            test,
        )?;
        tracing::debug!("Train and test data saved to {}", self.raw_dir().display());
        Ok(())
    }

    /// Persist the preprocessed partitions.
    pub fn save_processed(&self, train: &Table, test: &Table) -> Result<(), PipelineError> {
        write_pair(
            &self.processed_path(Partition::Train),
            train,
            &self.processed_path(Partition::Test),
            test,
        )?;
        tracing::debug!("Processed data saved to {}", self.interim_dir().display());
        Ok(())
    }
}

/// Write two tables as one logical unit (see module notes).
pub fn write_pair(
    first_path:  &Path,
    first:       &Table,
    second_path: &Path,
    second:      &Table,
) -> Result<(), PipelineError> {
    let first_tmp  = stage(first_path, first)?;
    let second_tmp = stage(second_path, second)?;

    first_tmp
        .persist(first_path)
        .map_err(|e| PipelineError::io(first_path, e.error))?;

    if let Err(e) = second_tmp.persist(second_path) {
        if let Err(cleanup) = fs::remove_file(first_path) {
            tracing::warn!(
                "Could not roll back '{}': {}",
                first_path.display(),
                cleanup
            );
        }
        return Err(PipelineError::io(second_path, e.error));
    }

    Ok(())
}

/// Write `table` to a temp file next to `target`. The temp file is
/// deleted automatically if it is dropped without being persisted.
fn stage(target: &Path, table: &Table) -> Result<NamedTempFile, PipelineError> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PipelineError::io(dir, e))?;
    write_csv(tmp.as_file_mut(), table).map_err(|e| PipelineError::io(target, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PipelineError::io(target, e))?;
    Ok(tmp)
}

/// Header row, then one record per row; missing cells are empty.
fn write_csv(file: &mut File, table: &Table) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(table.columns()).map_err(into_io)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .map_err(into_io)?;
    }
    writer.flush()
}

fn into_io(err: csv::Error) -> io::Error {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        _ => io::Error::new(io::ErrorKind::InvalidData, message),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_partition;

    fn table(rows: &[(&str, Option<&str>)]) -> Table {
        let mut t = Table::new(["target", "text"]);
        for (target, text) in rows {
            t.push_row(vec![Some(target.to_string()), text.map(str::to_string)])
                .unwrap();
        }
        t
    }

    #[test]
    fn test_layout() {
        let store = ArtifactStore::new("data");
        assert_eq!(store.raw_path(Partition::Train), Path::new("data/raw/train.csv"));
        assert_eq!(
            store.processed_path(Partition::Test),
            Path::new("data/Interim/test_processed.csv")
        );
    }

    #[test]
    fn test_save_raw_creates_dirs_and_writes_header() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let train = table(&[("ham", Some("Ok lar, joking")), ("spam", Some("Free entry"))]);
        let test  = table(&[("ham", Some("See you"))]);

        store.save_raw(&train, &test).unwrap();

        let written = fs::read_to_string(store.raw_path(Partition::Train)).unwrap();
        assert_eq!(written, "target,text\nham,\"Ok lar, joking\"\nspam,Free entry\n");

        // Reading back yields the same table
        assert_eq!(load_partition(&store.raw_path(Partition::Train)).unwrap(), train);
        assert_eq!(load_partition(&store.raw_path(Partition::Test)).unwrap(), test);
    }

    #[test]
    fn test_missing_cells_written_empty() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let t     = table(&[("0", None), ("1", Some("free"))]);

        store.save_processed(&t, &t).unwrap();

        let written = fs::read_to_string(store.processed_path(Partition::Train)).unwrap();
        assert_eq!(written, "target,text\n0,\n1,free\n");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let t     = table(&[("ham", Some("hi"))]);

        store.save_raw(&t, &t).unwrap();

        let mut names: Vec<String> = fs::read_dir(store.raw_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["test.csv", "train.csv"]);
    }

    #[test]
    fn test_failed_second_write_rolls_back_first() {
        let dir   = tempfile::tempdir().unwrap();
        let first = dir.path().join("train.csv");
        // A directory where the second file should go makes the rename fail
        let second = dir.path().join("test.csv");
        fs::create_dir_all(second.join("occupied")).unwrap();

        let t   = table(&[("ham", Some("hi"))]);
        let err = write_pair(&first, &t, &second, &t).unwrap_err();

        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(!first.exists());
    }
}
