//! Google Gemini REST integration.
//!
//! [`GeminiClient`] calls `models/{model}:generateContent` with a JSON
//! response schema and maps the structured output to a
//! [`SegmentationResponse`](dreadboard_core::SegmentationResponse).

mod client;
mod dto;
mod prompt;

pub use client::{GeminiClient, parse_segmentation_response};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    UsageMetadata,
};
pub use prompt::{build_segmentation_prompt, segmentation_schema};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, dreadboard_error::GeminiError>;
