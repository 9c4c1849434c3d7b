//! Error types for the Dreadboard storyboard pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use dreadboard_error::{DreadboardResult, SegmentationError, SegmentationErrorKind};
//!
//! fn next_batch() -> DreadboardResult<()> {
//!     Err(SegmentationError::new(SegmentationErrorKind::BatchInFlight))?
//! }
//!
//! match next_batch() {
//!     Ok(()) => println!("committed"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod json;
mod segmentation;
mod storage;

pub use config::ConfigError;
pub use error::{DreadboardError, DreadboardErrorKind, DreadboardResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use json::JsonError;
pub use segmentation::{SegmentationError, SegmentationErrorKind};
pub use storage::{StorageError, StorageErrorKind};
