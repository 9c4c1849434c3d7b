//! Top-level error wrapper types.

use crate::{ConfigError, GeminiError, JsonError, SegmentationError, StorageError};

/// Every error a Dreadboard operation can surface.
///
/// # Examples
///
/// ```
/// use dreadboard_error::{DreadboardError, JsonError};
///
/// let json_err = JsonError::new("trailing characters");
/// let err: DreadboardError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DreadboardErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// State persistence error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini backend error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Segmentation pipeline error
    #[from(SegmentationError)]
    Segmentation(SegmentationError),
}

/// Dreadboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use dreadboard_error::{ConfigError, DreadboardResult};
///
/// fn might_fail() -> DreadboardResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Dreadboard Error: {}", _0)]
pub struct DreadboardError(Box<DreadboardErrorKind>);

impl DreadboardError {
    /// Create a new error from a kind.
    pub fn new(kind: DreadboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DreadboardErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to DreadboardErrorKind
impl<T> From<T> for DreadboardError
where
    T: Into<DreadboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Dreadboard operations.
pub type DreadboardResult<T> = std::result::Result<T, DreadboardError>;
