//! Operation reports returned on success.

use std::time::Duration;

use crate::ArchiveMode;

/// Report of a completed build.
///
/// Returned only after every file was added and the archive was flushed and
/// closed; its presence is the success indicator.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Whether the archive was created fresh or updated.
    pub mode: ArchiveMode,

    /// Number of entries written from source files.
    pub files_added: usize,

    /// Pre-existing entries replaced by a source with the same stored name.
    pub entries_replaced: usize,

    /// Pre-existing entries carried over unchanged.
    pub entries_retained: usize,

    /// Total bytes read from source files (uncompressed).
    pub bytes_read: u64,

    /// Size of the finished archive file in bytes.
    pub archive_size: u64,

    /// Duration of the operation.
    pub duration: Duration,
}

impl BuildReport {
    /// Creates an empty report for the given mode.
    #[must_use]
    pub fn new(mode: ArchiveMode) -> Self {
        Self {
            mode,
            files_added: 0,
            entries_replaced: 0,
            entries_retained: 0,
            bytes_read: 0,
            archive_size: 0,
            duration: Duration::ZERO,
        }
    }

    /// Total number of entries in the finished archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_added + self.entries_retained
    }

    /// Returns the compression ratio (uncompressed / archive size).
    ///
    /// Returns 0.0 if either side is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziptrack_core::{ArchiveMode, BuildReport};
    ///
    /// let mut report = BuildReport::new(ArchiveMode::Create);
    /// report.bytes_read = 1000;
    /// report.archive_size = 250;
    /// assert_eq!(report.compression_ratio(), 4.0);
    /// ```
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }
}

/// Report of a completed extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Number of directory entries skipped because structure was flattened.
    pub directories_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the operation.
    pub duration: Duration,
}

impl ExtractReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created + self.directories_skipped
    }
}
