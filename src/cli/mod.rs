// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All pipeline work is delegated to Layer 2 (application).
//
// Four commands are supported:
//   1. `ingest`     — raw CSV → data/raw/{train,test}.csv
//   2. `preprocess` — data/raw/ → data/Interim/*_processed.csv
//   3. `run`        — both stages in order
//   4. `normalize`  — prints one normalised message
//
// A failing stage is logged with tracing::error! and its error
// is returned to main(), which exits non-zero.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use commands::{Commands, IngestArgs, NormalizeArgs, PreprocessArgs, RunArgs};

use crate::infra::params::Params;

#[derive(Parser, Debug)]
#[command(
    name = "spam-prep",
    version = "0.1.0",
    about = "Ingest the SMS spam corpus and preprocess it into model-ready partitions."
)]
pub struct Cli {
    /// Directory for per-stage log files
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log to stderr only
    #[arg(long, global = true)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Name of the stage, used for its log file. `normalize`
    /// is a diagnostic and has none.
    pub fn stage_name(&self) -> Option<&'static str> {
        match self.command {
            Commands::Ingest(_)     => Some("ingestion"),
            Commands::Preprocess(_) => Some("preprocessing"),
            Commands::Run(_)        => Some("pipeline"),
            Commands::Normalize(_)  => None,
        }
    }

    /// Where this run's log file goes, if anywhere.
    pub fn log_dir(&self) -> Option<&Path> {
        if self.no_log_file || self.stage_name().is_none() {
            None
        } else {
            Some(&self.log_dir)
        }
    }

    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        let stage  = self.stage_name().unwrap_or("normalize");
        let result = match self.command {
            Commands::Ingest(args)     => run_ingest(args),
            Commands::Preprocess(args) => run_preprocess(args),
            Commands::Run(args)        => run_all(args),
            Commands::Normalize(args)  => run_normalize(args),
        };

        if let Err(e) = &result {
            tracing::error!("{} failed: {:#}", stage, e);
        }
        result
    }
}

fn run_ingest(args: IngestArgs) -> Result<()> {
    use crate::application::ingest_use_case::IngestUseCase;

    let params = Params::load(&args.common.params)?;
    let config = args.options.to_config(&args.common, &params)?;

    let summary = IngestUseCase::new(config).execute()?;
    println!(
        "Ingestion complete: {} train rows, {} test rows.",
        summary.train_rows, summary.test_rows
    );
    Ok(())
}

fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let params = Params::load_or_default(&args.common.params)?;
    let config = args.options.to_config(&args.common, &params);

    let summary = PreprocessUseCase::new(config).execute()?;
    println!(
        "Preprocessing complete: {} train rows, {} test rows.",
        summary.train.rows_out, summary.test.rows_out
    );
    Ok(())
}

fn run_all(args: RunArgs) -> Result<()> {
    use crate::application::ingest_use_case::IngestUseCase;
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let params = Params::load(&args.common.params)?;

    // ── Stage 1: Ingestion ───────────────────────────────────────────────────
    let ingest_config = args.ingest.to_config(&args.common, &params)?;
    let ingested      = IngestUseCase::new(ingest_config).execute()?;
    tracing::info!(
        "Ingestion complete: {} train rows, {} test rows",
        ingested.train_rows,
        ingested.test_rows
    );

    // ── Stage 2: Preprocessing ───────────────────────────────────────────────
    let preprocess_config = args.preprocess.to_config(&args.common, &params);
    let processed         = PreprocessUseCase::new(preprocess_config).execute()?;

    println!(
        "Pipeline complete: {} train rows, {} test rows.",
        processed.train.rows_out, processed.test.rows_out
    );
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    use crate::data::normalizer::{normalize, TextNormalizer};
    use commands::StemmerArg;

    let normalized = match args.stemmer {
        StemmerArg::Porter => normalize(&args.text),
        other              => TextNormalizer::with_kind(other.into()).normalize(&args.text),
    };
    println!("{normalized}");
    Ok(())
}
