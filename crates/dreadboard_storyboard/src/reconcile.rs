//! Consumption reconciliation.
//!
//! The generator returns excerpts that are usually, but not always, verbatim
//! copies of the window. Reconciliation decides how far into the narrative a
//! batch reached by anchoring the last excerpt in the window:
//!
//! 1. exact: last occurrence of the excerpt in the window
//! 2. normalized: the same search after folding case, whitespace runs,
//!    curly quotes and dashes
//! 3. estimated: window start plus the length of all excerpts joined by a space

use crate::cursor::{TextWindow, clamp_cursor};
use serde::{Deserialize, Serialize};

/// Which strategy located the end of the consumed text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Reconciliation {
    /// The last excerpt was found verbatim
    #[display("exact")]
    Exact,
    /// The last excerpt was found after normalization
    #[display("normalized")]
    Normalized,
    /// No anchor was found; the cursor advanced by the excerpt length
    #[display("estimated")]
    Estimated,
}

/// Result of reconciling one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledCursor {
    /// New cursor, clamped to the narrative and on a char boundary
    pub cursor: usize,
    /// Strategy that produced it
    pub method: Reconciliation,
}

/// All non-empty excerpts joined by a single space.
///
/// # Examples
///
/// ```
/// use dreadboard_storyboard::consumed_approx;
///
/// assert_eq!(consumed_approx(&["One.", "", " Two. "]), "One. Two.");
/// ```
pub fn consumed_approx(excerpts: &[&str]) -> String {
    excerpts
        .iter()
        .map(|excerpt| excerpt.trim())
        .filter(|excerpt| !excerpt.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compute the cursor after a batch whose excerpts were produced from `window`.
///
/// `window` must have been taken from `narrative`. Silent (empty) excerpts
/// never serve as the anchor; when every excerpt is silent the estimate is
/// the window start.
///
/// # Examples
///
/// ```
/// use dreadboard_storyboard::{Reconciliation, reconcile, unconsumed_text};
///
/// let narrative = "A dark night. The wind howled. She ran.";
/// let window = unconsumed_text(narrative, 0);
/// let result = reconcile(narrative, &window, &["A dark night.", "The wind howled."]);
/// assert_eq!(result.cursor, 30);
/// assert_eq!(result.method, Reconciliation::Exact);
/// ```
pub fn reconcile(narrative: &str, window: &TextWindow<'_>, excerpts: &[&str]) -> ReconciledCursor {
    let anchor = excerpts
        .iter()
        .rev()
        .map(|excerpt| excerpt.trim())
        .find(|excerpt| !excerpt.is_empty());

    let (raw, method) = match anchor {
        Some(anchor) => {
            if let Some(index) = window.text().rfind(anchor) {
                (window.offset() + index + anchor.len(), Reconciliation::Exact)
            } else if let Some(end) = normalized_rfind_end(window.text(), anchor) {
                (window.offset() + end, Reconciliation::Normalized)
            } else {
                (
                    window.offset() + consumed_approx(excerpts).len(),
                    Reconciliation::Estimated,
                )
            }
        }
        None => (window.offset(), Reconciliation::Estimated),
    };

    ReconciledCursor {
        cursor: clamp_cursor(narrative, raw),
        method,
    }
}

/// Text folded for comparison, with the original byte end of every folded char.
struct Folded {
    chars: Vec<char>,
    ends: Vec<usize>,
}

fn fold(text: &str) -> Folded {
    let mut chars = Vec::with_capacity(text.len());
    let mut ends = Vec::with_capacity(text.len());
    let mut last_was_space = false;

    for (index, ch) in text.char_indices() {
        let end = index + ch.len_utf8();
        if ch.is_whitespace() {
            if !last_was_space {
                chars.push(' ');
                ends.push(end);
                last_was_space = true;
            }
            continue;
        }
        last_was_space = false;

        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => {
                chars.push('\'');
                ends.push(end);
            }
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => {
                chars.push('"');
                ends.push(end);
            }
            '\u{2010}'..='\u{2015}' | '\u{2212}' => {
                chars.push('-');
                ends.push(end);
            }
            '\u{2026}' => {
                for _ in 0..3 {
                    chars.push('.');
                    ends.push(end);
                }
            }
            other => {
                for lower in other.to_lowercase() {
                    chars.push(lower);
                    ends.push(end);
                }
            }
        }
    }

    Folded { chars, ends }
}

/// Byte offset in `haystack` just past the last folded match of `needle`.
fn normalized_rfind_end(haystack: &str, needle: &str) -> Option<usize> {
    let needle = fold(needle.trim());
    if needle.chars.is_empty() {
        return None;
    }
    let haystack = fold(haystack);
    let width = needle.chars.len();
    if width > haystack.chars.len() {
        return None;
    }

    (0..=haystack.chars.len() - width)
        .rev()
        .find(|&start| haystack.chars[start..start + width] == needle.chars[..])
        .map(|start| haystack.ends[start + width - 1])
}
