// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline talks to its collaborators through these traits
// so that a different source or stemming algorithm can be
// swapped in without touching the stage logic:
//   - CsvFileSource and HttpCsvSource implement TableSource
//   - PorterStemmer and SnowballStemmer implement Stemmer
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::PipelineError;
use crate::domain::table::Table;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Any component that can produce a raw table.
///
/// Implementations:
///   - CsvFileSource → reads a CSV file from disk
///   - HttpCsvSource → downloads a CSV over http(s)
pub trait TableSource {
    /// Read the whole source into memory.
    fn load(&self) -> Result<Table, PipelineError>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}

// ─── Stemmer ──────────────────────────────────────────────────────────────────
/// Reduces a lowercase word to its stem.
///
/// Implementations must be pure: the same word always gives the
/// same stem, and `&self` is never mutated, so one stemmer can be
/// shared between partitions.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;

    /// Short name shown in logs (`porter`, `snowball`)
    fn name(&self) -> &'static str;
}
