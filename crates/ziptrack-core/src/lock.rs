//! Advisory locking of the archive file for the duration of one call.
//!
//! Builds hold an exclusive lock, extractions a shared one. Contention fails
//! immediately instead of waiting. The lock is released when the guard drops,
//! on success and on every error path.

use std::fs::File;
use std::fs::OpenOptions;
use std::fs::TryLockError;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;

/// Open archive file holding an advisory lock.
#[derive(Debug)]
pub(crate) struct ArchiveLock {
    file: File,
    path: PathBuf,
}

impl ArchiveLock {
    /// Opens (creating if needed) `path` for read/write and takes an
    /// exclusive lock.
    ///
    /// The file is never truncated here; the builder decides what to do with
    /// existing content once the lock is held.
    pub(crate) fn exclusive(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| ArchiveError::ArchiveOpen {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::acquire(file, path, File::try_lock)
    }

    /// Opens `path` read-only and takes a shared lock.
    pub(crate) fn shared(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ArchiveError::ArchiveOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::acquire(file, path, File::try_lock_shared)
    }

    fn acquire(
        file: File,
        path: &Path,
        try_lock: fn(&File) -> std::result::Result<(), TryLockError>,
    ) -> Result<Self> {
        match try_lock(&file) {
            Ok(()) => Ok(Self {
                file,
                path: path.to_path_buf(),
            }),
            Err(TryLockError::WouldBlock) => Err(ArchiveError::ArchiveLocked {
                path: path.to_path_buf(),
            }),
            Err(TryLockError::Error(e)) => Err(ArchiveError::Io(e)),
        }
    }

    /// The locked file handle.
    pub(crate) fn file(&self) -> &File {
        &self.file
    }

    /// The archive path this lock guards.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArchiveLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
