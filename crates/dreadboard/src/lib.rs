//! Dreadboard - incremental script-to-scene segmentation.
//!
//! Dreadboard turns a long horror narrative into a numbered storyboard by
//! sending it to a generation service in bounded batches. Each batch is
//! reconciled against the source text so the narrative is covered completely,
//! in order, with no overlap, even when the service paraphrases.
//!
//! # Quick Start
//!
//! ```no_run
//! use dreadboard::{DreadboardConfig, GeminiClient, Segmenter, StoryContext, StoryboardState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DreadboardConfig::load()?;
//!     let client = GeminiClient::from_config(&config)?;
//!     let segmenter = Segmenter::new(
//!         client,
//!         config.styles().clone(),
//!         *config.segmentation().batch_size(),
//!     )?;
//!
//!     let mut state = StoryboardState::new(std::fs::read_to_string("story.txt")?);
//!     segmenter
//!         .run_to_completion(&mut state, &StoryContext::default(), None, |_, _| Ok(()))
//!         .await?;
//!
//!     for scene in state.scenes() {
//!         println!("{}: {}", scene.scene_number, scene.spoken_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - export tracing spans through OpenTelemetry (stdout exporter)
//! - `api` - enable tests that call the real Gemini API
//!
//! # Architecture
//!
//! - `dreadboard_error` - error types
//! - `dreadboard_core` - data model (scenes, styles, requests)
//! - `dreadboard_interface` - `SceneGenerator` backend trait
//! - `dreadboard_retry` - retry policy and layered configuration
//! - `dreadboard_models` - Gemini backend
//! - `dreadboard_storyboard` - cursor tracking, reconciliation, pipeline
//!
//! This crate re-exports everything for convenience.

pub use dreadboard_core::*;
pub use dreadboard_error::*;
pub use dreadboard_interface::*;
pub use dreadboard_models::*;
pub use dreadboard_retry::*;
pub use dreadboard_storyboard::*;

pub mod observability;
