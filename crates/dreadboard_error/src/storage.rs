//! Storage error types for persisted storyboard state.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the state directory
    #[display("Failed to create state directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a state file
    #[display("Failed to write state file: {}", _0)]
    FileWrite(String),
    /// Failed to read a state file
    #[display("Failed to read state file: {}", _0)]
    FileRead(String),
    /// Failed to remove a state file
    #[display("Failed to remove state file: {}", _0)]
    FileRemove(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use dreadboard_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FileRead("state.json".to_string()));
/// assert!(format!("{}", err).contains("state.json"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
