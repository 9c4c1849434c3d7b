//! Generation backend integrations for Dreadboard.
//!
//! Currently one provider is implemented: Google Gemini over its REST
//! `generateContent` endpoint, with structured JSON output.
//!
//! # Example
//!
//! ```no_run
//! use dreadboard_core::{ContentFormat, SegmentationRequestBuilder};
//! use dreadboard_interface::SceneGenerator;
//! use dreadboard_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let request = SegmentationRequestBuilder::default()
//!     .text_window("The house was silent. Then the phone rang.")
//!     .batch_size(5usize)
//!     .starting_scene_number(1usize)
//!     .character_description("")
//!     .style_id("dark-cartoon-v1")
//!     .format(ContentFormat::Short)
//!     .build()?;
//! let response = client.segment(&request).await?;
//! println!("{} scenes", response.scenes.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod gemini;

pub use extraction::extract_json;
pub use gemini::{
    Candidate, Content, GeminiClient, GeminiResult, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part, UsageMetadata, build_segmentation_prompt,
    parse_segmentation_response, segmentation_schema,
};
