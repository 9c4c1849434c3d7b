//! Incremental script-to-scene segmentation.
//!
//! A long narrative is segmented in bounded batches. Each batch sends the
//! unconsumed remainder to a [`SceneGenerator`](dreadboard_interface::SceneGenerator),
//! reconciles how much of the text the returned excerpts covered, advances
//! a persistent cursor and decides whether the narrative is finished.
//!
//! # Example
//!
//! ```no_run
//! use dreadboard_core::{ArtStyle, StoryContext};
//! use dreadboard_interface::SceneGenerator;
//! use dreadboard_storyboard::{Segmenter, StoryboardState};
//!
//! # async fn run(generator: impl SceneGenerator) -> Result<(), Box<dyn std::error::Error>> {
//! let styles = vec![ArtStyle::new("ink", "Ink", "popular", "", "black ink wash")];
//! let segmenter = Segmenter::new(generator, styles, 5)?;
//! let mut state = StoryboardState::new(std::fs::read_to_string("story.txt")?);
//!
//! segmenter
//!     .run_to_completion(&mut state, &StoryContext::default(), None, |_, _| Ok(()))
//!     .await?;
//! println!("{} scenes", state.scenes().len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod cursor;
mod pipeline;
mod reconcile;
mod state;
mod store;

pub use completion::{COMPLETION_TOLERANCE, Completion, decide_completion};
pub use cursor::{EXHAUSTION_THRESHOLD, TextWindow, clamp_cursor, is_exhausted, unconsumed_text};
pub use pipeline::{DEFAULT_BATCH_SIZE, Segmenter, request_next_batch};
pub use reconcile::{ReconciledCursor, Reconciliation, consumed_approx, reconcile};
pub use state::{BatchOutcome, SegmentationPhase, StoryboardState, StoryboardStatus};
pub use store::StateStore;
