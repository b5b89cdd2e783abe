use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use patchdown_transform::TransformConfig;

mod docs;

/// Rewrite unified-diff code fences in markdown docs into annotated listings.
#[derive(Parser)]
#[command(name = "patchdown")]
#[command(about = "Rewrites diff code fences in markdown docs into annotated listings", long_about = None)]
struct Cli {
    /// Documentation directory to process recursively.
    docs_dir: PathBuf,

    /// Report files that would change without writing anything.
    #[arg(long)]
    check: bool,

    /// Path to a config file. If omitted, uses ./patchdown.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug-level logging to stderr.
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let config = match &cli.config {
        Some(path) => TransformConfig::load_path(path)?,
        None => TransformConfig::load(),
    };

    let summary = docs::process_tree(&cli.docs_dir, &config, cli.check).await?;

    log::info!(
        "{} file(s) scanned, {} with diff fences, {} block failure(s)",
        summary.files_seen,
        summary.files_changed,
        summary.failed_blocks
    );

    if summary.failed_blocks > 0 {
        log::error!("{} code block(s) could not be annotated", summary.failed_blocks);
        return Ok(ExitCode::FAILURE);
    }
    if cli.check && summary.files_changed > 0 {
        log::error!(
            "{} file(s) still contain unannotated diff fences",
            summary.files_changed
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
