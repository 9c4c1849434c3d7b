//! Test utilities for storyboard tests.
//!
//! Provides scripted and sentence-splitting scene generators.

#![allow(dead_code)]

use async_trait::async_trait;
use dreadboard_core::{
    ArtStyle, GeneratedScene, SegmentationRequest, SegmentationResponse, StoryContext,
    StoryContextBuilder,
};
use dreadboard_error::{
    DreadboardError, DreadboardErrorKind, DreadboardResult, GeminiError, GeminiErrorKind,
    SegmentationErrorKind,
};
use dreadboard_interface::SceneGenerator;
use std::sync::{Arc, Mutex};

/// A single scripted generator response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(SegmentationResponse),
    Error(GeminiErrorKind),
}

/// Generator that replays a fixed sequence of responses.
#[derive(Debug, Clone)]
pub struct MockSceneGenerator {
    responses: Vec<MockResponse>,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<SegmentationRequest>>>,
}

impl MockSceneGenerator {
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new_success(response: SegmentationResponse) -> Self {
        Self::new_sequence(vec![MockResponse::Success(response)])
    }

    pub fn new_error(error: GeminiErrorKind) -> Self {
        Self::new_sequence(vec![MockResponse::Error(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<SegmentationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SceneGenerator for MockSceneGenerator {
    async fn segment(&self, req: &SegmentationRequest) -> DreadboardResult<SegmentationResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let current = {
            let mut count = self.call_count.lock().unwrap();
            let current = *count;
            *count += 1;
            current
        };

        match self.responses.get(current) {
            Some(MockResponse::Success(response)) => Ok(response.clone()),
            Some(MockResponse::Error(kind)) => {
                Err(DreadboardError::from(GeminiError::new(kind.clone())))
            }
            None => Err(DreadboardError::from(GeminiError::new(
                GeminiErrorKind::Transport(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    current + 1,
                    self.responses.len()
                )),
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-segmenter"
    }
}

/// Generator that returns the window's sentences verbatim, `batch_size` at a time.
#[derive(Debug, Clone, Default)]
pub struct SentenceGenerator {
    call_count: Arc<Mutex<usize>>,
}

impl SentenceGenerator {
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

/// Split text into sentences ending in `.`, `!` or `?` (or the end of text).
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let sentence = current.trim().to_string();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}

#[async_trait]
impl SceneGenerator for SentenceGenerator {
    async fn segment(&self, req: &SegmentationRequest) -> DreadboardResult<SegmentationResponse> {
        *self.call_count.lock().unwrap() += 1;
        let all = sentences(req.text_window());
        let taken: Vec<GeneratedScene> = all
            .iter()
            .take(*req.batch_size())
            .map(|sentence| GeneratedScene {
                // Deliberately wrong; the pipeline renumbers
                scene_number: 0,
                visual_description: format!("Frame for: {}", sentence),
                script: sentence.clone(),
                editing_tips: String::new(),
            })
            .collect();
        Ok(SegmentationResponse {
            has_more_scenes: all.len() > taken.len(),
            scenes: taken,
            tokens_used: 100,
        })
    }

    fn provider_name(&self) -> &'static str {
        "sentences"
    }

    fn model_name(&self) -> &str {
        "sentence-splitter"
    }
}

/// Build a response from scripts.
pub fn response(scripts: &[&str], has_more_scenes: bool) -> SegmentationResponse {
    SegmentationResponse {
        scenes: scripts
            .iter()
            .enumerate()
            .map(|(i, script)| GeneratedScene {
                scene_number: i + 1,
                visual_description: format!("Visual {}", i + 1),
                script: script.to_string(),
                editing_tips: "Slow push in".to_string(),
            })
            .collect(),
        has_more_scenes,
        tokens_used: 42,
    }
}

pub fn styles() -> Vec<ArtStyle> {
    vec![
        ArtStyle::new("ink", "Ink", "popular", "", "black ink wash"),
        ArtStyle::new("oil", "Oil", "historical", "", "oil painting"),
    ]
}

pub fn context(style_id: &str) -> StoryContext {
    StoryContextBuilder::default()
        .character_description("A night nurse with a lantern")
        .style_id(style_id)
        .build()
        .unwrap()
}

/// The segmentation error kind inside `err`, if it is one.
pub fn segmentation_kind(err: &DreadboardError) -> Option<&SegmentationErrorKind> {
    match err.kind() {
        DreadboardErrorKind::Segmentation(e) => Some(&e.kind),
        _ => None,
    }
}
