//! Usage counters for display and budgeting.

use serde::{Deserialize, Serialize};

/// Accumulated usage of the generation services for one storyboard.
///
/// These counters are informational; nothing in the pipeline branches on them.
///
/// # Examples
///
/// ```
/// use dreadboard_core::UsageStats;
///
/// let mut usage = UsageStats::default();
/// usage.add_tokens(1_200);
/// usage.add(&UsageStats { tokens: 300, images: 2, audio: 1 });
/// assert_eq!(usage.tokens, 1_500);
/// assert_eq!(usage.images, 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageStats {
    /// Text tokens billed
    pub tokens: u64,
    /// Images rendered
    pub images: u64,
    /// Narration clips synthesized
    pub audio: u64,
}

impl UsageStats {
    /// Add another set of counters to this one.
    pub fn add(&mut self, other: &UsageStats) {
        self.tokens = self.tokens.saturating_add(other.tokens);
        self.images = self.images.saturating_add(other.images);
        self.audio = self.audio.saturating_add(other.audio);
    }

    /// Add billed tokens.
    pub fn add_tokens(&mut self, tokens: u64) {
        self.tokens = self.tokens.saturating_add(tokens);
    }
}
