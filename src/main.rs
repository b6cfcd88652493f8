mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use derby_reset::config::ResetConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "derby-reset",
    version,
    about = "Delete all race data (and car photos) from the Pinewood Derby backend"
)]
struct Cli {
    /// Config file to read instead of ~/.derby-reset/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Leave the photo bucket untouched
    #[arg(long)]
    keep_photos: bool,

    /// Storage bucket holding car photos
    #[arg(long, value_name = "NAME")]
    bucket: Option<String>,

    /// Print the steps that would run and exit without contacting the backend
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ResetConfig::load_from(path)?,
        None => ResetConfig::load()?,
    };
    if cli.keep_photos {
        config.reset.purge_photos = false;
    }
    if let Some(bucket) = cli.bucket {
        config.reset.bucket = bucket;
    }

    // Log to stderr so stdout carries only the status lines.
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.dry_run {
        cli::reset::dry_run(&config);
        return Ok(());
    }

    config.validate()?;
    cli::reset::reset(&config).await
}
