//! Response mapping through the public API.

use dreadboard_models::{
    Candidate, Content, GenerateContentResponse, Part, UsageMetadata, parse_segmentation_response,
};

fn response(text: &str, usage: Option<UsageMetadata>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part {
                    text: Some(text.to_string()),
                }],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
        usage_metadata: usage,
    }
}

#[test]
fn test_silent_scene_keeps_empty_script() -> anyhow::Result<()> {
    let body = r#"{
        "scenes": [
            {"sceneNumber": 4, "visualDescription": "Fog over a lake", "script": "", "editingTips": "Hold"},
            {"sceneNumber": 5, "visualDescription": "A boat", "script": "Something moved.", "editingTips": ""}
        ],
        "hasMoreScenes": true
    }"#;
    let parsed = parse_segmentation_response(&response(body, None))?;

    assert_eq!(parsed.scenes.len(), 2);
    assert_eq!(parsed.scenes[0].script, "");
    assert_eq!(parsed.scenes[1].scene_number, 5);
    assert_eq!(parsed.tokens_used, 0);
    Ok(())
}

#[test]
fn test_tokens_are_prompt_plus_candidates() -> anyhow::Result<()> {
    let usage = UsageMetadata {
        prompt_token_count: 1000,
        candidates_token_count: 250,
        total_token_count: 1900,
    };
    let parsed = parse_segmentation_response(&response(
        r#"{"scenes": [], "hasMoreScenes": false}"#,
        Some(usage),
    ))?;
    assert_eq!(parsed.tokens_used, 1250);
    Ok(())
}

#[test]
fn test_text_split_across_parts_is_joined() -> anyhow::Result<()> {
    let mut multi = response(r#"{"scenes": [], "#, None);
    if let Some(content) = multi.candidates[0].content.as_mut() {
        content.parts.push(Part {
            text: Some(r#""hasMoreScenes": true}"#.to_string()),
        });
    }
    let parsed = parse_segmentation_response(&multi)?;
    assert!(parsed.has_more_scenes);
    Ok(())
}

#[test]
fn test_empty_response_is_rejected() {
    let empty = GenerateContentResponse::default();
    assert!(parse_segmentation_response(&empty).is_err());
}

#[test]
fn test_non_json_text_is_rejected() {
    let result = parse_segmentation_response(&response("I'd rather not.", None));
    assert!(result.is_err());
}
