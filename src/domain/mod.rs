// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that define what the pipeline
// works with. Nothing in here touches the filesystem or the
// network, which keeps it trivially unit-testable.
//
//   table.rs  — the in-memory Table every stage passes along
//   error.rs  — the PipelineError taxonomy
//   traits.rs — TableSource and Stemmer seams
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

pub mod error;
pub mod table;
pub mod traits;

use std::fmt;

/// Which side of the train/test split a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    /// File stem used for artifacts (`train.csv`, `test_processed.csv`)
    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Test  => "test",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
