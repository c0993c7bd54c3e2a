// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to run one pipeline
// stage end to end.
//
// Rules for this layer:
//   - No table algorithms here (that's Layer 4)
//   - No argument parsing or printing here (that's Layer 1)
//   - File layout and persistence belong to Layer 6
//   - Only workflow coordination and error context
//
// Each stage is an independent run: ingestion writes raw/,
// preprocessing reads raw/ and writes Interim/.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The ingestion stage: fetch, prune, split, save
pub mod ingest_use_case;

// The preprocessing stage: encode, dedupe, normalise, save
pub mod preprocess_use_case;
