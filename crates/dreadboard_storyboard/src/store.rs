//! JSON persistence for storyboard state.

use crate::StoryboardState;
use derive_getters::Getters;
use dreadboard_error::{DreadboardResult, JsonError, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists a [`StoryboardState`] to a single JSON file.
///
/// Saves go through a sibling temporary file and a rename, so a crash
/// mid-write leaves the previous state intact.
#[derive(Debug, Clone, Getters)]
pub struct StateStore {
    /// Location of the state file
    path: PathBuf,
}

impl StateStore {
    /// Creates a store for `path`. Nothing touches the filesystem until
    /// [`save`](Self::save).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Whether a saved state exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the saved state, or `None` if nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> DreadboardResult<Option<StoryboardState>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No existing state file");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        let state: StoryboardState = serde_json::from_str(&contents)
            .map_err(|e| JsonError::new(format!("Failed to parse state file: {}", e)))?;

        debug!(
            path = %self.path.display(),
            scenes = state.scenes().len(),
            cursor = state.cursor(),
            "Loaded state"
        );
        Ok(Some(state))
    }

    /// Saves `state`, replacing any previous file and creating the parent
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, directory creation or the write fails.
    pub fn save(&self, state: &StoryboardState) -> DreadboardResult<()> {
        let missing_parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && !p.exists());
        if let Some(parent) = missing_parent {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
            debug!(path = %parent.display(), "Created state directory");
        }

        let contents = serde_json::to_string_pretty(state)
            .map_err(|e| JsonError::new(format!("Failed to serialize state: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", tmp.display(), e)))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        debug!(
            path = %self.path.display(),
            scenes = state.scenes().len(),
            cursor = state.cursor(),
            "Saved state"
        );
        Ok(())
    }

    /// Deletes the saved state. Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete(&self) -> DreadboardResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRemove(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        debug!(path = %self.path.display(), "Deleted state");
        Ok(true)
    }
}
