//! Core data types for the Dreadboard storyboard pipeline.
//!
//! This crate provides the foundation data types shared by the generation
//! backends, the segmentation pipeline and the CLI.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod format;
mod request;
mod scene;
mod style;
mod usage;

pub use format::ContentFormat;
pub use request::{
    GeneratedScene, SegmentationRequest, SegmentationRequestBuilder, SegmentationResponse,
    StoryContext, StoryContextBuilder,
};
pub use scene::{DEFAULT_SCENE_DURATION_SECS, SILENT_SCENE_LABEL, Scene};
pub use style::{ArtStyle, resolve_style};
pub use usage::UsageStats;
