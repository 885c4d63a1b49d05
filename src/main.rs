mod config;
mod error;
mod lyrics;
mod prompt;
mod report;
mod run;
mod scan;
mod tags;
mod writer;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "flac-lyrics",
    version,
    about = "Fetch and embed synced lyrics into FLAC files"
)]
struct Cli {
    /// Folder containing FLAC files (searched recursively).
    directory: PathBuf,

    /// Overwrite existing lyrics and LRC files.
    #[arg(long)]
    force: bool,

    /// Ask before updating each file.
    #[arg(long)]
    prompt: bool,

    /// Show actions without writing changes.
    #[arg(long)]
    dry_run: bool,

    /// Write the summary to a file; without a path, a timestamped name is used.
    #[arg(long, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Captured before any blocking work spawns threads, so the local offset
    // is still readable.
    let started = report::now_local();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let run_config = run::RunConfig {
        directory: cli.directory,
        force: cli.force,
        prompt: cli.prompt,
        dry_run: cli.dry_run,
        log_target: report::LogTarget::from_arg(cli.log_file),
    };
    let log_path = run_config.log_target.resolve(started);
    let directory = run_config.directory.clone();

    let client = lyrics::LrclibClient::new(&cfg.lyrics)?;
    let mut runner = run::Runner::new(run_config, client, prompt::Prompt::stdio());
    let reports = runner
        .run()
        .await
        .with_context(|| format!("scan {}", directory.display()))?;

    let lines = report::summary_lines(&reports);
    report::print_summary(&lines);

    if let Some(path) = log_path {
        report::write_log(&path, &lines)?;
        println!("\nLog written to {}", path.display());
    }

    Ok(())
}
