//! Storyboard scenes.

use crate::{ArtStyle, GeneratedScene};
use serde::{Deserialize, Serialize};

/// Timeline duration given to a freshly produced scene (middle of the 4-8 s target).
pub const DEFAULT_SCENE_DURATION_SECS: f64 = 6.0;

/// Placeholder shown for scenes without narration.
pub const SILENT_SCENE_LABEL: &str = "(Silence)";

/// A single segmented unit of the narrative.
///
/// Scene numbers are 1-based, unique and strictly increasing across a run.
/// Once produced a scene is never renumbered; later edits such as attaching
/// a rendered image update it in place.
///
/// # Examples
///
/// ```
/// use dreadboard_core::{ArtStyle, GeneratedScene, Scene};
///
/// let style = ArtStyle::new("ink", "Ink", "popular", "", "black ink wash");
/// let generated = GeneratedScene {
///     scene_number: 99,
///     visual_description: "An empty hallway".to_string(),
///     script: "The lights went out.".to_string(),
///     editing_tips: "Hold on the door".to_string(),
/// };
///
/// let scene = Scene::from_generated(4, generated, &style);
/// assert_eq!(scene.scene_number, 4);
/// assert_eq!(scene.full_prompt, "black ink wash.\n\nAn empty hallway");
/// assert!(!scene.is_silent());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position in the storyboard
    pub scene_number: usize,
    /// What the frame should show
    pub visual_description: String,
    /// Style prompt followed by the visual description
    pub full_prompt: String,
    /// Style prompt fragment this scene was produced with
    pub style_block: String,
    /// Spoken excerpt of the narrative; empty for a silent scene
    pub script: String,
    /// Editorial notes from the generator
    pub editing_tips: String,
    /// Rendered image, attached after generation
    #[serde(default)]
    pub generated_image_url: Option<String>,
    /// Duration on the timeline, in seconds
    pub duration_secs: f64,
}

impl Scene {
    /// Build a scene from generator output, assigning its final number.
    pub fn from_generated(scene_number: usize, generated: GeneratedScene, style: &ArtStyle) -> Self {
        let style_block = style.prompt().clone();
        let full_prompt = format!("{}.\n\n{}", style_block, generated.visual_description);
        Self {
            scene_number,
            visual_description: generated.visual_description,
            full_prompt,
            style_block,
            script: generated.script.trim().to_string(),
            editing_tips: generated.editing_tips,
            generated_image_url: None,
            duration_secs: DEFAULT_SCENE_DURATION_SECS,
        }
    }

    /// Whether the scene has no narration.
    pub fn is_silent(&self) -> bool {
        self.script.trim().is_empty()
    }

    /// Narration for display, with a placeholder for silent scenes.
    pub fn spoken_text(&self) -> &str {
        if self.is_silent() {
            SILENT_SCENE_LABEL
        } else {
            &self.script
        }
    }

    /// Whether an image has been attached.
    pub fn has_image(&self) -> bool {
        self.generated_image_url.is_some()
    }
}
