//! Wasmclip CLI
//!
//! Headless harness for the wasmclip transformation pipeline: resolves an
//! edit plan into the exact engine invocations a browser session would
//! issue, and dry-runs them against an in-memory engine stand-in.
//!
//! # Usage
//!
//! ```bash
//! wasmclip plan --source-format mp4 --duration 00:02:00 \
//!     --trim-from 00:00:10 --trim-to 00:01:00 --convert-to webm --codec vp9
//! wasmclip formats
//! wasmclip probe --input engine.log
//! ```

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use wasmclip::cli::{commands, Cli, Commands};
use wasmclip::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration (file, then environment overrides)
    let config = Config::load(cli.config.as_deref().map(Path::new))?;

    // Initialize logging; CLI flag wins over config
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting wasmclip");

    // Execute the requested command
    match cli.command {
        Commands::Plan(args) => commands::execute_plan(args, &config).await?,
        Commands::Formats(args) => commands::execute_formats(args)?,
        Commands::Probe(args) => commands::execute_probe(args)?,
    }

    Ok(())
}
