//! Error conversion utilities for CLI.
//!
//! Converts ziptrack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use ziptrack_core::ArchiveError;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Source file '{}' does not exist or is not a readable regular file\n\
                 HINT: Only regular files can be added; '{}' was left unchanged.",
                path.display(),
                archive.display()
            )
        }
        ArchiveError::ArchiveOpen { path, reason } => {
            anyhow!(
                "Cannot open archive '{}': {}\n\
                 HINT: Check that the path exists and is a valid ZIP file.",
                path.display(),
                reason
            )
        }
        ArchiveError::ArchiveLocked { path } => {
            anyhow!(
                "Archive '{}' is in use by another ziptrack process\n\
                 HINT: Wait for the other build or extract to finish and retry.",
                path.display()
            )
        }
        ArchiveError::DuplicateEntry { name } => {
            anyhow!(
                "Two sources would both be stored as '{}' in '{}'\n\
                 HINT: Use --full-paths to keep entries apart by directory.",
                name,
                archive.display()
            )
        }
        ArchiveError::UnsafeEntryName { name } => {
            anyhow!(
                "Security violation: Archive '{}' contains entry '{}' that escapes the output directory\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                name
            )
        }
        ArchiveError::DestinationDir { path, source } => {
            anyhow!(
                "Cannot create output directory '{}': {}\n\
                 HINT: Check permissions on the destination.",
                path.display(),
                source
            )
        }
        ArchiveError::LengthMismatch { expected, actual } => {
            anyhow!(
                "Size changed while processing '{}': expected {} bytes, saw {}\n\
                 HINT: A source file may have been modified during the build.",
                archive.display(),
                expected,
                actual
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or malformed.",
                archive.display(),
                reason
            )
        }
    }
}

/// Adds context to a core result about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_unsafe_entry_error() {
        let err = ArchiveError::UnsafeEntryName {
            name: "../../../etc/passwd".to_string(),
        };
        let converted = convert_archive_error(err, Path::new("malicious.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("escapes the output directory"));
        assert!(msg.contains("malicious.zip"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_locked_error() {
        let err = ArchiveError::ArchiveLocked {
            path: PathBuf::from("busy.zip"),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("busy.zip")));
        assert!(msg.contains("in use"));
        assert!(msg.contains("retry"));
    }

    #[test]
    fn test_convert_duplicate_entry_error() {
        let err = ArchiveError::DuplicateEntry {
            name: "a.txt".to_string(),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("out.zip")));
        assert!(msg.contains("--full-paths"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ArchiveError::Io(io_err);
        let converted = convert_archive_error(err, Path::new("archive.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }
}
