//! Source file references and total size aggregation.

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::ArchiveError;
use crate::Result;

/// A file on disk that will become one archive entry.
///
/// Captured once before the archive is opened; the core never mutates the
/// underlying file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// Byte length at the time of the stat.
    pub len: u64,
    /// Last modification time, if the platform reports one.
    pub modified: Option<SystemTime>,
    /// Unix permission bits (`None` on other platforms).
    pub mode: Option<u32>,
}

impl SourceFile {
    /// Opens `path` to confirm it is a readable regular file and records its
    /// length and modification time.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::SourceNotFound`] if the path does not exist,
    /// cannot be opened for reading, or is not a regular file.
    pub fn stat(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let not_found = || ArchiveError::SourceNotFound {
            path: path.to_path_buf(),
        };

        let file = File::open(path).map_err(|_| not_found())?;
        let metadata = file.metadata().map_err(|_| not_found())?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;
            Some(metadata.permissions().mode())
        };
        #[cfg(not(unix))]
        let mode = None;

        Ok(Self {
            path: path.to_path_buf(),
            len: metadata.len(),
            modified: metadata.modified().ok(),
            mode,
        })
    }

    /// Returns the bare file name, or the whole path if it has none.
    #[must_use]
    pub fn file_name(&self) -> &Path {
        self.path
            .file_name()
            .map_or(self.path.as_path(), Path::new)
    }
}

/// Stats every path in order, failing fast on the first bad one.
///
/// # Errors
///
/// Returns [`ArchiveError::SourceNotFound`] for the first missing or
/// unreadable path.
pub fn collect_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceFile>> {
    paths.iter().map(SourceFile::stat).collect()
}

/// Sums the byte length of `paths`.
///
/// # Errors
///
/// Returns [`ArchiveError::SourceNotFound`] if any path is missing or
/// unreadable. No archive I/O happens before this check.
///
/// # Examples
///
/// ```no_run
/// use ziptrack_core::source::total_size;
///
/// let total = total_size(&["a.txt", "b.txt"])?;
/// println!("{total} bytes to archive");
/// # Ok::<(), ziptrack_core::ArchiveError>(())
/// ```
pub fn total_size<P: AsRef<Path>>(paths: &[P]) -> Result<u64> {
    Ok(sum_len(&collect_sources(paths)?))
}

/// Sums the lengths of already-collected sources.
#[must_use]
pub fn sum_len(sources: &[SourceFile]) -> u64 {
    sources
        .iter()
        .fold(0u64, |acc, s| acc.saturating_add(s.len))
}
