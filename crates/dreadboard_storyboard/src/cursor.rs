//! Text cursor tracking.
//!
//! The cursor is a UTF-8 byte offset into the narrative that always sits on
//! a char boundary. Everything before it has been segmented.

/// A remainder shorter than this many characters is treated as consumed.
pub const EXHAUSTION_THRESHOLD: usize = 5;

/// The trimmed, unconsumed slice of a narrative.
///
/// `offset` is the absolute byte position at which `text` starts, so any
/// leading whitespace skipped by the trim counts as consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextWindow<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> TextWindow<'a> {
    /// The window text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Absolute byte offset of the first byte of [`text`](Self::text).
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute byte offset just past the window.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Whether the window is too short to be worth another batch.
    pub fn is_exhausted(&self) -> bool {
        is_exhausted(self.text)
    }
}

/// Clamp `cursor` into `narrative`, flooring to a char boundary.
///
/// # Examples
///
/// ```
/// use dreadboard_storyboard::clamp_cursor;
///
/// assert_eq!(clamp_cursor("abc", 99), 3);
/// // 'é' occupies bytes 1..3
/// assert_eq!(clamp_cursor("héllo", 2), 1);
/// ```
pub fn clamp_cursor(narrative: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(narrative.len());
    while !narrative.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// The unsegmented remainder of `narrative` after `cursor`, trimmed.
///
/// # Examples
///
/// ```
/// use dreadboard_storyboard::unconsumed_text;
///
/// let narrative = "It rained.   The door opened.  ";
/// let window = unconsumed_text(narrative, 10);
/// assert_eq!(window.text(), "The door opened.");
/// assert_eq!(window.offset(), 13);
/// ```
pub fn unconsumed_text(narrative: &str, cursor: usize) -> TextWindow<'_> {
    let start = clamp_cursor(narrative, cursor);
    let rest = &narrative[start..];
    let without_leading = rest.trim_start();
    let leading = rest.len() - without_leading.len();
    TextWindow {
        text: without_leading.trim_end(),
        offset: start + leading,
    }
}

/// True when `window` holds fewer than [`EXHAUSTION_THRESHOLD`] characters.
pub fn is_exhausted(window: &str) -> bool {
    window.chars().nth(EXHAUSTION_THRESHOLD - 1).is_none()
}
