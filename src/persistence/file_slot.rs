//! File-backed durable slot.
//!
//! Every replace writes the full blob to a temporary file in the target's
//! directory, syncs it, and atomically renames it over the target via
//! `tempfile::NamedTempFile::persist()`. A crash mid-write therefore leaves
//! either the old file or the new one, never a torn mix.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use super::slot::DurableSlot;
use crate::{AppError, Result};

/// Durable slot stored in a single file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot backed by the file at `path`. The file need not exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl DurableSlot for FileSlot {
    fn read(&self) -> Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(AppError::Storage(format!(
                "failed to read {}: {err}",
                self.path.display()
            ))),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let parent = self.parent_dir();
        fs::create_dir_all(parent).map_err(|err| {
            AppError::Storage(format!(
                "failed to create state directory {}: {err}",
                parent.display()
            ))
        })?;

        let mut tmp = NamedTempFile::new_in(parent)
            .map_err(|err| AppError::Storage(format!("failed to create temporary file: {err}")))?;

        tmp.write_all(bytes)
            .map_err(|err| AppError::Storage(format!("failed to write temporary file: {err}")))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| AppError::Storage(format!("failed to sync temporary file: {err}")))?;

        tmp.persist(&self.path).map_err(|err| {
            AppError::Storage(format!(
                "failed to persist state to {}: {err}",
                self.path.display()
            ))
        })?;

        trace!(path = %self.path.display(), bytes = bytes.len(), "state file replaced");
        Ok(())
    }
}
