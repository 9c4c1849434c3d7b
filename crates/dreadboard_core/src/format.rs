//! Target content formats.

use serde::{Deserialize, Serialize};

/// The video format a storyboard is produced for.
///
/// The format only shapes prompt construction (aspect ratio hints); it has
/// no effect on how the narrative is segmented.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use dreadboard_core::ContentFormat;
///
/// let format = ContentFormat::from_str("short").unwrap();
/// assert_eq!(format, ContentFormat::Short);
/// assert_eq!(format.aspect_ratio(), "9:16");
/// assert_eq!(format.to_string(), "YouTube Short (Vertical 9:16)");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum ContentFormat {
    /// Vertical short-form video
    #[default]
    #[strum(serialize = "short", to_string = "YouTube Short (Vertical 9:16)")]
    Short,
    /// Horizontal long-form video
    #[strum(serialize = "long", to_string = "Long Form (Horizontal 16:9)")]
    Long,
    /// Episode of a horizontal series
    #[strum(serialize = "series", to_string = "Series Episode")]
    Series,
}

impl ContentFormat {
    /// Aspect ratio used for scene imagery in this format.
    pub fn aspect_ratio(&self) -> &'static str {
        match self {
            ContentFormat::Short => "9:16",
            ContentFormat::Long | ContentFormat::Series => "16:9",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(ContentFormat::from_str("LONG").unwrap(), ContentFormat::Long);
        assert_eq!(ContentFormat::from_str("Series").unwrap(), ContentFormat::Series);
        assert!(ContentFormat::from_str("reel").is_err());
    }

    #[test]
    fn every_format_has_an_aspect_ratio() {
        for format in ContentFormat::iter() {
            assert!(format.aspect_ratio().contains(':'));
        }
    }
}
