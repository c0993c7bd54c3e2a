mod cli;
mod application;
mod domain;
mod data;
mod infra;

use anyhow::Result;
use cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = infra::logging::init(cli.stage_name().unwrap_or("spam-prep"), cli.log_dir())? {
        tracing::debug!("Logging to {}", path.display());
    }

    cli.run()
}
