//! Storyboard state and its commit rules.

use crate::Reconciliation;
use dreadboard_core::{Scene, UsageStats};
use dreadboard_error::{DreadboardResult, SegmentationError, SegmentationErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where a narrative is in its segmentation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SegmentationPhase {
    /// Nothing segmented yet
    #[display("empty")]
    Empty,
    /// Some text segmented, more remains
    #[display("processing")]
    Processing,
    /// Narrative fully segmented; absorbing until a new narrative is adopted
    #[display("done")]
    Done,
}

/// User-facing storyboard status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryboardStatus {
    /// Every part of the script has scenes
    #[display("Script visualized")]
    Visualized,
    /// A batch is in flight
    #[display("Processing...")]
    Processing,
    /// More batches are needed
    #[display("Needs more scenes")]
    NeedsMoreScenes,
}

/// The result of one batch, ready to be committed.
///
/// Produced by [`request_next_batch`](crate::request_next_batch) from a
/// shared borrow of the state and applied with [`StoryboardState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// New scenes, numbered consecutively from the state's next scene number
    pub scenes: Vec<Scene>,
    /// Cursor after the batch
    pub new_cursor: usize,
    /// Finished flag after the batch
    pub new_finished: bool,
    /// Tokens billed for the batch
    pub tokens_used: u64,
    /// How the cursor was located; `None` when no backend call was made
    pub reconciliation: Option<Reconciliation>,
}

impl BatchOutcome {
    /// An outcome that only marks the narrative as finished.
    pub fn finished_without_call(narrative_len: usize) -> Self {
        Self {
            scenes: Vec::new(),
            new_cursor: narrative_len,
            new_finished: true,
            tokens_used: 0,
            reconciliation: None,
        }
    }

    /// Whether this outcome was decided without calling the generator.
    pub fn is_short_circuit(&self) -> bool {
        self.reconciliation.is_none()
    }
}

/// All mutable state of one segmentation run.
///
/// # Examples
///
/// ```
/// use dreadboard_storyboard::{SegmentationPhase, StoryboardState};
///
/// let mut state = StoryboardState::new("It was a quiet town.");
/// assert_eq!(state.phase(), SegmentationPhase::Empty);
/// assert_eq!(state.next_scene_number(), 1);
///
/// state.adopt_narrative("A different story entirely.");
/// assert_eq!(state.cursor(), 0);
/// assert!(!state.is_finished());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryboardState {
    narrative: String,
    #[serde(rename = "processed_char_count")]
    cursor: usize,
    #[serde(rename = "is_script_finished")]
    finished: bool,
    scenes: Vec<Scene>,
    #[serde(default)]
    usage: UsageStats,
    #[serde(skip)]
    is_generating: bool,
}

impl StoryboardState {
    /// Start a run over `narrative`.
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            ..Self::default()
        }
    }

    /// Replace the narrative, discarding scenes and resetting the cursor.
    ///
    /// Usage counters are kept.
    pub fn adopt_narrative(&mut self, narrative: impl Into<String>) {
        self.narrative = narrative.into();
        self.cursor = 0;
        self.finished = false;
        self.scenes.clear();
        self.is_generating = false;
        info!(
            narrative_len = self.narrative.len(),
            "Adopted new narrative"
        );
    }

    /// The narrative being segmented.
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Byte offset of the end of the segmented prefix.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the narrative is fully segmented.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scenes produced so far, in order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Accumulated usage.
    pub fn usage(&self) -> &UsageStats {
        &self.usage
    }

    /// Mutable usage counters, for collaborators that bill audio or images.
    pub fn usage_mut(&mut self) -> &mut UsageStats {
        &mut self.usage
    }

    /// Whether a batch is currently pending.
    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Number the next produced scene will carry.
    pub fn next_scene_number(&self) -> usize {
        self.scenes.len() + 1
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SegmentationPhase {
        if self.finished {
            SegmentationPhase::Done
        } else if self.cursor == 0 && self.scenes.is_empty() {
            SegmentationPhase::Empty
        } else {
            SegmentationPhase::Processing
        }
    }

    /// Mark a batch as pending.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentationErrorKind::BatchInFlight`] if one already is.
    pub fn begin_batch(&mut self) -> DreadboardResult<()> {
        if self.is_generating {
            return Err(SegmentationError::new(SegmentationErrorKind::BatchInFlight).into());
        }
        self.is_generating = true;
        Ok(())
    }

    /// Clear the pending flag after a failed batch, leaving everything else untouched.
    pub fn abort_batch(&mut self) {
        self.is_generating = false;
    }

    /// Commit a batch outcome.
    ///
    /// The cursor never moves backwards and a finished narrative stays
    /// finished, whatever the outcome says.
    pub fn apply(&mut self, outcome: BatchOutcome) {
        if outcome.new_cursor < self.cursor {
            warn!(
                cursor = self.cursor,
                new_cursor = outcome.new_cursor,
                "Ignoring backwards cursor in batch outcome"
            );
        }
        let added = outcome.scenes.len();
        self.cursor = self
            .cursor
            .max(outcome.new_cursor)
            .min(self.narrative.len());
        self.finished |= outcome.new_finished;
        if self.finished {
            self.cursor = self.narrative.len();
        }
        self.scenes.extend(outcome.scenes);
        self.usage.add_tokens(outcome.tokens_used);
        self.is_generating = false;

        debug!(
            added,
            cursor = self.cursor,
            finished = self.finished,
            total_scenes = self.scenes.len(),
            "Applied batch outcome"
        );
    }

    /// Attach a rendered image to a scene.
    ///
    /// Returns `false` if no scene has that number.
    pub fn attach_image(&mut self, scene_number: usize, url: impl Into<String>) -> bool {
        match self
            .scenes
            .iter_mut()
            .find(|scene| scene.scene_number == scene_number)
        {
            Some(scene) => {
                scene.generated_image_url = Some(url.into());
                self.usage.images = self.usage.images.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Percentage of the narrative segmented, 0 to 100.
    pub fn script_progress(&self) -> f64 {
        if self.finished {
            return 100.0;
        }
        if self.narrative.is_empty() {
            return 0.0;
        }
        (self.cursor as f64 / self.narrative.len() as f64 * 100.0).min(100.0)
    }

    /// Percentage of scenes with an attached image, 0 to 100.
    pub fn render_progress(&self) -> f64 {
        if self.scenes.is_empty() {
            return 0.0;
        }
        let rendered = self.scenes.iter().filter(|scene| scene.has_image()).count();
        rendered as f64 / self.scenes.len() as f64 * 100.0
    }

    /// Status label for display.
    pub fn status(&self) -> StoryboardStatus {
        if self.finished {
            StoryboardStatus::Visualized
        } else if self.is_generating {
            StoryboardStatus::Processing
        } else {
            StoryboardStatus::NeedsMoreScenes
        }
    }
}
