//! Scoped ownership of downloaded files.
//!
//! A `TempMedia` owns one path in the download directory. The file is removed
//! exactly once: either through `remove()` or when the guard is dropped, so
//! every early return and error path cleans up after itself.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What happened when a file was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// Nothing to remove: the file was already gone
    AlreadyGone,
    /// Removal failed for another reason (logged, never escalated)
    Failed,
}

/// Best-effort removal of a file.
///
/// A missing file is not an error; any other failure is logged at warn level
/// and reported as `RemoveOutcome::Failed`.
pub fn cleanup_file(path: &Path) -> RemoveOutcome {
    match fs_err::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed temporary file {}", path.display());
            RemoveOutcome::Removed
        }
        Err(e) if e.kind() == ErrorKind::NotFound => RemoveOutcome::AlreadyGone,
        Err(e) => {
            log::warn!("Failed to remove temporary file: {}", e);
            RemoveOutcome::Failed
        }
    }
}

/// Guard owning a temporary downloaded file.
#[derive(Debug)]
pub struct TempMedia {
    path: PathBuf,
    released: bool,
}

impl TempMedia {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the guard has already removed its file.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Size of the file on disk in bytes.
    pub fn size_bytes(&self) -> std::io::Result<u64> {
        Ok(fs_err::metadata(&self.path)?.len())
    }

    /// Gives up ownership: the file stays on disk and its path is returned.
    pub fn keep(mut self) -> PathBuf {
        self.released = true;
        std::mem::take(&mut self.path)
    }

    /// Removes the file now. Calling it again is a no-op.
    pub fn remove(&mut self) -> RemoveOutcome {
        if self.released {
            return RemoveOutcome::AlreadyGone;
        }
        self.released = true;
        cleanup_file(&self.path)
    }
}

impl Drop for TempMedia {
    fn drop(&mut self) {
        if !self.released {
            self.remove();
        }
    }
}
