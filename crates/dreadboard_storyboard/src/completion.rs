//! Completion decision.

/// A computed cursor this close to the end of the narrative counts as done.
pub const COMPLETION_TOLERANCE: usize = 10;

/// Outcome of the completion decision for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Cursor to commit; exactly the narrative length when finished
    pub cursor: usize,
    /// Whether the narrative is fully segmented
    pub finished: bool,
}

/// Combine the generator's signal with the reconciled cursor.
///
/// Finished when the generator reports nothing left, or when the cursor is
/// within [`COMPLETION_TOLERANCE`] bytes of the end. A finished decision
/// snaps the cursor to `narrative_len`.
///
/// # Examples
///
/// ```
/// use dreadboard_storyboard::decide_completion;
///
/// let done = decide_completion(100, 97, true);
/// assert!(done.finished);
/// assert_eq!(done.cursor, 100);
///
/// let more = decide_completion(100, 40, true);
/// assert!(!more.finished);
/// assert_eq!(more.cursor, 40);
/// ```
pub fn decide_completion(
    narrative_len: usize,
    computed_cursor: usize,
    has_more_scenes: bool,
) -> Completion {
    let near_end = computed_cursor.saturating_add(COMPLETION_TOLERANCE) >= narrative_len;
    if !has_more_scenes || near_end {
        Completion {
            cursor: narrative_len,
            finished: true,
        }
    } else {
        Completion {
            cursor: computed_cursor,
            finished: false,
        }
    }
}
