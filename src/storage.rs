//! Local slot storage for Taskora
//!
//! A slot is a single named JSON record in the user's data directory.
//! Slots back the session and theme stores, mirroring the single-key
//! persistence model of the service's browser client.

use crate::error::{Result, TaskoraError};
use anyhow::Context;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Storage backend for serialized single-record slots
///
/// Each slot is one JSON file. Reads treat malformed content as absence
/// and remove the offending file, so corruption never propagates to
/// callers.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the user's data directory
    ///
    /// The directory can be overridden with the `TASKORA_DATA_DIR`
    /// environment variable, which makes it easy to point the binary at a
    /// scratch location without touching the real application data.
    ///
    /// # Errors
    ///
    /// Returns error if the data directory cannot be determined or created
    pub fn new() -> Result<Self> {
        if let Ok(override_dir) = std::env::var("TASKORA_DATA_DIR") {
            return Self::with_dir(override_dir);
        }

        let proj_dirs = ProjectDirs::from("com", "xbcsmith", "taskora")
            .ok_or_else(|| TaskoraError::Storage("Could not determine data directory".into()))?;

        Self::with_dir(proj_dirs.data_dir())
    }

    /// Create a store rooted at the specified directory.
    ///
    /// This is primarily useful for tests where the default application
    /// data directory is not desirable (for example, a temporary
    /// directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use taskora::storage::LocalStore;
    ///
    /// let store = LocalStore::with_dir("/tmp/taskora_test_store").unwrap();
    /// ```
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&dir)
            .context("Failed to create data directory")
            .map_err(|e| TaskoraError::Storage(e.to_string()))?;

        Ok(Self { dir })
    }

    /// Directory this store writes slots into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Read and deserialize a slot
    ///
    /// Returns `None` when the slot is absent. Malformed content is
    /// treated as absence: the slot is cleared and `None` is returned
    /// rather than an error.
    pub fn read_slot<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.slot_path(name);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read slot '{}': {}", name, e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Slot '{}' is malformed ({}); clearing it", name, e);
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::warn!("Failed to clear malformed slot '{}': {}", name, e);
                }
                None
            }
        }
    }

    /// Serialize and write a slot, overwriting any prior value
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails
    pub fn write_slot<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .context("Failed to serialize slot value")
            .map_err(|e| TaskoraError::Storage(e.to_string()))?;

        std::fs::write(self.slot_path(name), json)
            .context("Failed to write slot")
            .map_err(|e| TaskoraError::Storage(e.to_string()))?;

        Ok(())
    }

    /// Remove a slot, ignoring absence
    pub fn clear_slot(&self, name: &str) {
        match std::fs::remove_file(self.slot_path(name)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to clear slot '{}': {}", name, e),
        }
    }
}
