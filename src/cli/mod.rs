//! CLI module for wasmclip
//!
//! This module handles command-line argument parsing and command
//! execution for the headless harness binary.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Wasmclip - client-side video transformation pipeline
///
/// Resolves ordered edit plans into WASM ffmpeg-engine invocations and
/// dry-runs them against an in-memory engine stand-in.
#[derive(Parser)]
#[command(name = "wasmclip")]
#[command(about = "Resolve and dry-run video transformation plans")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a transformation plan and show every engine invocation
    Plan(args::PlanArgs),
    /// List supported container formats and their codecs
    Formats(args::FormatsArgs),
    /// Scan engine log output for the source duration
    Probe(args::ProbeArgs),
}
