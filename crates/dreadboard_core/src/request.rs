//! Request and response types exchanged with a segmentation backend.

use crate::ContentFormat;
use serde::{Deserialize, Serialize};

/// Character and style context that accompanies every batch.
///
/// # Examples
///
/// ```
/// use dreadboard_core::{ContentFormat, StoryContextBuilder};
///
/// let context = StoryContextBuilder::default()
///     .character_description("A tired night nurse in her forties")
///     .style_id("dark-cartoon-v1")
///     .format(ContentFormat::Long)
///     .build()
///     .unwrap();
///
/// assert_eq!(context.style_id(), "dark-cartoon-v1");
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct StoryContext {
    /// Free-form physical description of the protagonist
    #[builder(default)]
    character_description: String,
    /// Identifier of the art style in the style catalog
    #[builder(default)]
    style_id: String,
    /// Target content format
    #[builder(default)]
    format: ContentFormat,
}

/// One bounded request to a segmentation backend.
///
/// # Examples
///
/// ```
/// use dreadboard_core::{ContentFormat, SegmentationRequestBuilder};
///
/// let request = SegmentationRequestBuilder::default()
///     .text_window("The house was silent. Then the phone rang.")
///     .batch_size(5usize)
///     .starting_scene_number(1usize)
///     .character_description("")
///     .style_id("dark-cartoon-v1")
///     .format(ContentFormat::Short)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.batch_size(), 5);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct SegmentationRequest {
    /// Unconsumed, trimmed slice of the narrative
    text_window: String,
    /// Maximum number of scenes to produce
    batch_size: usize,
    /// Number the first produced scene will carry (1-based)
    starting_scene_number: usize,
    /// Protagonist description for visual consistency
    character_description: String,
    /// Art style identifier
    style_id: String,
    /// Target content format
    format: ContentFormat,
}

impl SegmentationRequest {
    /// Build a request for `text_window` from a story context.
    pub fn from_context(
        text_window: impl Into<String>,
        batch_size: usize,
        starting_scene_number: usize,
        context: &StoryContext,
    ) -> Self {
        Self {
            text_window: text_window.into(),
            batch_size,
            starting_scene_number,
            character_description: context.character_description().clone(),
            style_id: context.style_id().clone(),
            format: *context.format(),
        }
    }
}

/// A scene exactly as the backend described it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScene {
    /// Scene number echoed by the generator (not trusted)
    #[serde(default)]
    pub scene_number: usize,
    /// Visual prompt for the scene
    #[serde(default)]
    pub visual_description: String,
    /// Spoken excerpt; empty means a silent scene
    #[serde(default)]
    pub script: String,
    /// Editorial notes
    #[serde(default)]
    pub editing_tips: String,
}

/// Backend response for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationResponse {
    /// Scenes in narrative order
    #[serde(default)]
    pub scenes: Vec<GeneratedScene>,
    /// Whether the generator believes unprocessed text remains
    #[serde(default)]
    pub has_more_scenes: bool,
    /// Tokens billed for the call
    #[serde(default)]
    pub tokens_used: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_tolerates_missing_fields() {
        let json = r#"{"scenes":[{"sceneNumber":3,"visualDescription":"A hallway"}]}"#;
        let response: SegmentationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.scenes.len(), 1);
        assert_eq!(response.scenes[0].script, "");
        assert!(!response.has_more_scenes);
        assert_eq!(response.tokens_used, 0);
    }

    #[test]
    fn request_copies_context() {
        let context = StoryContextBuilder::default()
            .character_description("tall, pale")
            .style_id("noir")
            .format(ContentFormat::Series)
            .build()
            .unwrap();
        let request = SegmentationRequest::from_context("window", 4, 11, &context);
        assert_eq!(request.character_description(), "tall, pale");
        assert_eq!(request.style_id(), "noir");
        assert_eq!(*request.format(), ContentFormat::Series);
        assert_eq!(*request.starting_scene_number(), 11);
    }
}
