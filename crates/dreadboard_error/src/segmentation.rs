//! Segmentation pipeline error types.

/// Specific error conditions for a segmentation batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SegmentationErrorKind {
    /// Generator returned no scenes for a window that still had text
    #[display("Generator returned zero scenes for batch starting at scene {}", _0)]
    ZeroScenes(usize),
    /// Reconciled cursor did not move past its previous position
    #[display("Batch did not advance the cursor past offset {}", _0)]
    NoProgress(usize),
    /// Backend call failed (after any retries)
    #[display("Segmentation batch failed: {}", _0)]
    BatchFailed(String),
    /// A batch was requested while another one is still pending
    #[display("A segmentation batch is already in flight")]
    BatchInFlight,
    /// Batch size must request at least one scene
    #[display("Invalid batch size: {}", _0)]
    InvalidBatchSize(usize),
}

/// Error type for segmentation operations.
///
/// # Examples
///
/// ```
/// use dreadboard_error::{SegmentationError, SegmentationErrorKind};
///
/// let err = SegmentationError::new(SegmentationErrorKind::ZeroScenes(6));
/// assert!(format!("{}", err).contains("zero scenes"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Segmentation Error: {} at line {} in {}", kind, line, file)]
pub struct SegmentationError {
    /// The specific error condition
    pub kind: SegmentationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SegmentationError {
    /// Create a new SegmentationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SegmentationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
