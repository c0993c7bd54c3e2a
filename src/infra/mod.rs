// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the use cases but owned by
// none of them:
//
//   params.rs    — params.yaml loading and validation
//                  Parses the settings document with serde_yaml
//                  and rejects out-of-range values before any
//                  stage starts work.
//
//   artifacts.rs — On-disk layout and CSV persistence
//                  Knows where raw/ and Interim/ live under the
//                  data root and writes each train/test pair as
//                  one all-or-nothing unit.
//
//   logging.rs   — tracing subscriber setup
//                  stderr plus an optional per-stage log file.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// params.yaml loading
pub mod params;

/// Artifact paths and atomic CSV pair writes
pub mod artifacts;

/// Subscriber initialisation
pub mod logging;
