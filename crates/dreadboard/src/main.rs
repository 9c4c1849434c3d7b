//! Dreadboard CLI binary.
//!
//! This binary provides command-line access to Dreadboard:
//! - Segment a narrative into storyboard scenes, resuming saved progress
//! - Inspect or delete saved progress
//! - List the configured art styles

use clap::Parser;
use dreadboard::DreadboardConfig;
use dreadboard::observability::{
    ObservabilityConfig, init_observability_with_config, shutdown_observability,
};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, list_styles, reset_state, run_segment, show_status};

    // Load .env before anything reads GEMINI_API_KEY
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::default().with_json_logs(cli.json_logs);
    if cli.verbose && std::env::var("RUST_LOG").is_err() {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    let config = match &cli.config {
        Some(path) => DreadboardConfig::from_file(path)?,
        None => DreadboardConfig::load()?,
    };

    match cli.command {
        Commands::Segment(args) => {
            run_segment(&args, &config).await?;
        }

        Commands::Status { state, json } => {
            show_status(&state, json)?;
        }

        Commands::Reset { state } => {
            reset_state(&state)?;
        }

        Commands::Styles => {
            list_styles(&config);
        }
    }

    shutdown_observability();
    Ok(())
}
