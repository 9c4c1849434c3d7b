//! Art style catalog entries.

use serde::{Deserialize, Serialize};

/// A visual style that scenes are rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ArtStyle {
    /// Stable identifier (e.g. `dark-cartoon-v1`)
    id: String,
    /// Display name
    name: String,
    /// Catalog category (e.g. `popular`, `anime`)
    #[serde(default)]
    category: String,
    /// Short human description
    #[serde(default)]
    description: String,
    /// Prompt fragment prepended to every scene's visual description
    prompt: String,
}

impl ArtStyle {
    /// Create a style entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: description.into(),
            prompt: prompt.into(),
        }
    }
}

/// Look up `style_id` in `catalog`, falling back to the first entry.
///
/// Returns `None` only when the catalog is empty.
///
/// # Examples
///
/// ```
/// use dreadboard_core::{ArtStyle, resolve_style};
///
/// let catalog = vec![
///     ArtStyle::new("ink", "Ink", "popular", "", "black ink wash"),
///     ArtStyle::new("oil", "Oil", "realistic", "", "oil painting"),
/// ];
/// assert_eq!(resolve_style(&catalog, "oil").unwrap().id(), "oil");
/// assert_eq!(resolve_style(&catalog, "missing").unwrap().id(), "ink");
/// ```
pub fn resolve_style<'a>(catalog: &'a [ArtStyle], style_id: &str) -> Option<&'a ArtStyle> {
    catalog
        .iter()
        .find(|style| style.id == style_id)
        .or_else(|| catalog.first())
}
