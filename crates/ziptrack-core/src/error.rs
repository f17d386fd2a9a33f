//! Error types for archive build and extract operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building or extracting an archive.
///
/// Every variant is surfaced to the caller as a definite failure. Nothing is
/// retried internally.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// A listed source file does not exist, is unreadable, or is not a
    /// regular file.
    ///
    /// Raised before the archive is opened, so no archive is touched.
    #[error("source file not found or unreadable: {path}")]
    SourceNotFound {
        /// The offending source path.
        path: PathBuf,
    },

    /// The archive cannot be created, opened, or parsed as a ZIP container.
    #[error("failed to open archive {path}: {reason}")]
    ArchiveOpen {
        /// The archive path.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// I/O operation failed mid-transfer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An output directory could not be created during extraction.
    #[error("failed to create directory {path}: {source}")]
    DestinationDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Another operation holds the lock on this archive.
    #[error("archive is in use by another operation: {path}")]
    ArchiveLocked {
        /// The archive path.
        path: PathBuf,
    },

    /// The number of bytes transferred disagrees with the declared length.
    #[error("length mismatch: expected {expected} bytes, transferred {actual}")]
    LengthMismatch {
        /// Declared length of the item.
        expected: u64,
        /// Bytes actually seen (may stop at `expected + 1` when the source
        /// overruns).
        actual: u64,
    },

    /// Two sources map to the same stored entry name.
    #[error("duplicate entry name: {name}")]
    DuplicateEntry {
        /// The colliding stored name.
        name: String,
    },

    /// Entry name would resolve outside the destination directory.
    #[error("unsafe entry name: {name}")]
    UnsafeEntryName {
        /// The stored entry name.
        name: String,
    },

    /// Container-level failure while reading or writing entries.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

impl ArchiveError {
    /// Returns `true` if the error was caused by the caller's input files
    /// rather than by the archive or the destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use ziptrack_core::ArchiveError;
    ///
    /// let err = ArchiveError::SourceNotFound {
    ///     path: PathBuf::from("missing.txt"),
    /// };
    /// assert!(err.is_source_error());
    ///
    /// let err = ArchiveError::InvalidArchive("bad central directory".to_string());
    /// assert!(!err.is_source_error());
    /// ```
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::LengthMismatch { .. }
                | Self::DuplicateEntry { .. }
        )
    }

    /// Returns `true` if running the same operation again could succeed
    /// without changing its inputs.
    ///
    /// Lock contention and transient I/O failures qualify; a corrupt archive
    /// or a missing source does not. Retrying is the caller's decision.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ArchiveLocked { .. } | Self::Io(_) | Self::DestinationDir { .. }
        )
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::ArchiveOpen { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Io(e),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_display() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("a.txt"),
        };
        assert_eq!(err.to_string(), "source file not found or unreadable: a.txt");
        assert!(err.is_source_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_archive_open_context() {
        let err = ArchiveError::ArchiveOpen {
            path: PathBuf::from("out.zip"),
            reason: "not a zip file".to_string(),
        };
        assert_eq!(err.context(), Some("not a zip file"));
        assert!(err.to_string().contains("out.zip"));
    }

    #[test]
    fn test_locked_is_retryable() {
        let err = ArchiveError::ArchiveLocked {
            path: PathBuf::from("out.zip"),
        };
        assert!(err.is_retryable());
        assert!(!err.is_source_error());
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = ArchiveError::LengthMismatch {
            expected: 5,
            actual: 6,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: expected 5 bytes, transferred 6"
        );
    }

    #[test]
    fn test_duplicate_entry_is_source_error() {
        let err = ArchiveError::DuplicateEntry {
            name: "a.txt".to_string(),
        };
        assert!(err.is_source_error());
        assert_eq!(err.to_string(), "duplicate entry name: a.txt");
    }

    #[test]
    fn test_destination_dir_has_source() {
        use std::error::Error as _;

        let err = ArchiveError::DestinationDir {
            path: PathBuf::from("/out/sub"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_zip_io_error_maps_to_io() {
        let zip_err = zip::result::ZipError::Io(std::io::Error::other("disk full"));
        let err = ArchiveError::from(zip_err);
        assert!(matches!(err, ArchiveError::Io(_)));
    }

    #[test]
    fn test_zip_format_error_maps_to_invalid_archive() {
        let zip_err = zip::result::ZipError::FileNotFound;
        let err = ArchiveError::from(zip_err);
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));
    }
}
