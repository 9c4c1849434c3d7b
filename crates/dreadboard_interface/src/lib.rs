//! Trait definitions for Dreadboard generation backends.
//!
//! The segmentation pipeline only ever talks to a backend through
//! [`SceneGenerator`], so tests can substitute a scripted generator and the
//! CLI can swap providers without touching the pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::SceneGenerator;
