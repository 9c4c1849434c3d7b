//! Segmentation prompt and response schema.

use dreadboard_core::SegmentationRequest;
use serde_json::{Value, json};

/// Build the instruction sent with each batch.
///
/// The model is asked for at most `batch_size` scenes whose `script` fields
/// are verbatim, short (about 15 to 25 words) excerpts of the window, in
/// order, and to report whether unsegmented text remains.
///
/// # Examples
///
/// ```
/// use dreadboard_core::{ContentFormat, SegmentationRequestBuilder};
/// use dreadboard_models::build_segmentation_prompt;
///
/// let request = SegmentationRequestBuilder::default()
///     .text_window("The house was silent.")
///     .batch_size(3usize)
///     .starting_scene_number(7usize)
///     .character_description("A night nurse")
///     .style_id("dark-cartoon-v1")
///     .format(ContentFormat::Long)
///     .build()
///     .unwrap();
///
/// let prompt = build_segmentation_prompt(&request);
/// assert!(prompt.contains("TEXT: \"The house was silent.\""));
/// assert!(prompt.contains("Scene Starting Number: 7"));
/// assert!(prompt.contains("16:9"));
/// ```
pub fn build_segmentation_prompt(request: &SegmentationRequest) -> String {
    let character = if request.character_description().trim().is_empty() {
        "(none provided)"
    } else {
        request.character_description().trim()
    };

    format!(
        "Analyze this horror narrative and break it into visual scenes.\n\
         TEXT: \"{text}\"\n\
         Character Description: {character}\n\
         Batch Size: {batch}\n\
         Scene Starting Number: {start}\n\
         Format: {format} (aspect ratio {ratio})\n\
         \n\
         IMPORTANT: Each scene's \"script\" segment MUST BE SHORT. Aim for approx. 15-25 words \
         (roughly 4-8 seconds of speech).\n\
         Do not output long paragraphs. Break the story into small, cinematic visual beats.\n\
         Produce at most {batch} scenes, in narrative order, starting at the beginning of TEXT.\n\
         Each \"script\" must be copied verbatim from TEXT. Scenes must not overlap or skip text.\n\
         Set \"hasMoreScenes\" to true if any part of TEXT is not covered by the scenes you return.\n\
         \n\
         For each scene, generate a visual prompt, the verbatim script segment, and editing tips.\n\
         Output Format: JSON.",
        text = request.text_window(),
        character = character,
        batch = request.batch_size(),
        start = request.starting_scene_number(),
        format = request.format(),
        ratio = request.format().aspect_ratio(),
    )
}

/// JSON schema for the structured segmentation output.
pub fn segmentation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scenes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sceneNumber": { "type": "INTEGER" },
                        "visualDescription": { "type": "STRING" },
                        "script": { "type": "STRING" },
                        "editingTips": { "type": "STRING" }
                    },
                    "required": ["sceneNumber", "visualDescription", "script", "editingTips"]
                }
            },
            "hasMoreScenes": { "type": "BOOLEAN" }
        },
        "required": ["scenes", "hasMoreScenes"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreadboard_core::{ContentFormat, SegmentationRequestBuilder};

    fn request(character: &str) -> SegmentationRequest {
        SegmentationRequestBuilder::default()
            .text_window("It began at midnight.")
            .batch_size(5usize)
            .starting_scene_number(1usize)
            .character_description(character)
            .style_id("cinematic")
            .format(ContentFormat::Short)
            .build()
            .unwrap()
    }

    #[test]
    fn prompt_carries_batch_parameters() {
        let prompt = build_segmentation_prompt(&request("A pale boy"));
        assert!(prompt.contains("Character Description: A pale boy"));
        assert!(prompt.contains("Batch Size: 5"));
        assert!(prompt.contains("at most 5 scenes"));
        assert!(prompt.contains("9:16"));
        assert!(prompt.contains("15-25 words"));
    }

    #[test]
    fn blank_character_is_marked() {
        let prompt = build_segmentation_prompt(&request("   "));
        assert!(prompt.contains("Character Description: (none provided)"));
    }

    #[test]
    fn schema_requires_scene_fields() {
        let schema = segmentation_schema();
        let required = &schema["properties"]["scenes"]["items"]["required"];
        assert_eq!(required.as_array().map(Vec::len), Some(4));
        assert_eq!(schema["properties"]["hasMoreScenes"]["type"], "BOOLEAN");
    }
}
