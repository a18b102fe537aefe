//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Depth Capture - point cloud and motion capture pipeline
#[derive(Parser, Debug)]
#[command(
    name = "depth-capture",
    author,
    version,
    about = "Depth camera point cloud capture pipeline",
    long_about = "Captures synchronized depth, color, and infrared frames, accumulates \n\
                  textured point samples and inertial readings in memory, and exports \n\
                  per-timestamp PLY point clouds plus a motion log when the capture \n\
                  window closes."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "DEPTH_CAPTURE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "DEPTH_CAPTURE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a capture window and export the buffers
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON); defaults apply when absent
    #[arg(short, long, env = "DEPTH_CAPTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override capture window length in seconds
    #[arg(long, env = "DEPTH_CAPTURE_DURATION")]
    pub duration: Option<u64>,

    /// Override output directory from configuration
    #[arg(long, env = "DEPTH_CAPTURE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Override the number of warm-up frame sets to discard
    #[arg(long, env = "DEPTH_CAPTURE_WARMUP")]
    pub warmup: Option<u64>,

    /// Validate configuration and exit without capturing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; defaults apply when absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
