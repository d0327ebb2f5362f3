//! Command-line argument definitions

use clap::Args;

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Source container format
    #[arg(short = 'f', long, default_value = "mp4")]
    pub source_format: String,

    /// Source duration (HH:MM:SS, MM:SS, or seconds)
    #[arg(short, long, default_value = "60")]
    pub duration: String,

    /// Trim start (HH:MM:SS, MM:SS, or seconds)
    #[arg(long)]
    pub trim_from: Option<String>,

    /// Trim end (HH:MM:SS, MM:SS, or seconds)
    #[arg(long)]
    pub trim_to: Option<String>,

    /// Drop the audio stream
    #[arg(long)]
    pub mute: bool,

    /// Apply the grayscale filter
    #[arg(long)]
    pub grayscale: bool,

    /// Convert to this container format
    #[arg(long)]
    pub convert_to: Option<String>,

    /// Codec for the conversion (default: the container's preferred codec)
    #[arg(long)]
    pub codec: Option<String>,

    /// Read the plan from a JSON file instead of flags
    #[arg(long)]
    pub plan_file: Option<String>,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the formats command
#[derive(Args, Debug)]
pub struct FormatsArgs {
    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Log file to scan (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<String>,
}
