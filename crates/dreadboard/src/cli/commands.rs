//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use dreadboard::ContentFormat;
use std::path::PathBuf;

/// Default location of the saved storyboard state.
pub const DEFAULT_STATE_PATH: &str = "dreadboard_state.json";

/// Dreadboard - segment horror narratives into storyboard scenes
#[derive(Parser, Debug)]
#[command(name = "dreadboard")]
#[command(about = "Segment horror narratives into storyboard scenes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Segment a script into scenes, resuming saved progress when possible
    Segment(SegmentArgs),

    /// Show saved storyboard progress
    Status {
        /// Saved state file
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: PathBuf,

        /// Print the full state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete saved storyboard progress
    Reset {
        /// Saved state file
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: PathBuf,
    },

    /// List the configured art styles
    Styles,
}

/// Arguments of the `segment` command
#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    /// Narrative text file
    #[arg(long)]
    pub script: PathBuf,

    /// Saved state file
    #[arg(long, default_value = DEFAULT_STATE_PATH)]
    pub state: PathBuf,

    /// Protagonist description for visual consistency
    #[arg(long, default_value = "")]
    pub character: String,

    /// Art style id (unknown ids fall back to the first configured style)
    #[arg(long, default_value = "dark-cartoon-v1")]
    pub style: String,

    /// Content format: short, long or series
    #[arg(long, default_value = "short")]
    pub format: ContentFormat,

    /// Scenes per batch (defaults to the configured batch size)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Stop after this many generator calls
    #[arg(long)]
    pub max_batches: Option<usize>,
}
