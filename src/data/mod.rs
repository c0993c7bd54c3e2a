// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything that touches table contents, from the raw CSV to
// the model-ready partitions.
//
// Ingestion flows in this order:
//
//   CSV (file or URL)
//       │
//       ▼
//   loader        → parses the CSV into a Table
//       │
//       ▼
//   schema        → drops junk columns, renames v1/v2
//       │
//       ▼
//   splitter      → seeded shuffle into train / test
//
// Preprocessing runs per partition:
//
//   train.csv / test.csv
//       │
//       ▼
//   encoder       → label strings to integer codes
//       │
//       ▼
//   preprocessor  → dedupe, then normalise every message
//       │
//       ▼
//   normalizer    → tokenizer + stopwords + stemmer
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// CSV sources (local file, HTTP) and partition loading
pub mod loader;

/// Column pruning and renaming for the raw dataset
pub mod schema;

/// Seeded train/test split
pub mod splitter;

/// Sorted-class label encoder
pub mod encoder;

/// Per-partition encode / dedupe / normalise
pub mod preprocessor;

/// Message normalisation
pub mod normalizer;

/// Treebank-style word tokenizer
pub mod tokenizer;

/// Porter and Snowball stemmers
pub mod stemmer;

/// English stopword and punctuation sets
pub mod stopwords;
