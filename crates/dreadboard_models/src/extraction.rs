//! Pull a JSON document out of model output.
//!
//! Even with `responseMimeType = application/json` models occasionally wrap
//! the document in a markdown fence or add a sentence before it.

use dreadboard_error::{GeminiError, GeminiErrorKind};

/// Extract a JSON object from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` or bare ``` ... ```
/// 2. The first balanced `{ ... }`
///
/// # Errors
///
/// Returns [`GeminiErrorKind::MalformedResponse`] if no object is found.
///
/// # Examples
///
/// ```
/// use dreadboard_models::extract_json;
///
/// let response = "```json\n{\"scenes\": [], \"hasMoreScenes\": false}\n```";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<String, GeminiError> {
    let trimmed = response.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed.to_string());
    }

    if let Some(json) =
        extract_from_code_block(response).and_then(|block| extract_balanced(&block, '{', '}'))
    {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON object found in model response"
    );

    Err(GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
        "No JSON object found in response (length: {})",
        response.len()
    ))))
}

/// Content of the first markdown code block, with or without a language tag.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip the language tag line
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    match response[skip_to..].find("```") {
        Some(end) => Some(response[skip_to..skip_to + end].trim().to_string()),
        // Truncated response without a closing fence
        None => Some(response[skip_to..].trim().to_string()),
    }
}

/// Content between the first `open` and its matching `close`, string-aware.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
