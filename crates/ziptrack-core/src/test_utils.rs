//! Test helpers for building fixture archives and recording progress.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ProgressSink;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (name, content). Names may contain `/` to nest
/// files; no directory entries are written.
///
/// # Examples
///
/// ```
/// use ziptrack_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (name, data)| {
            builder.add_file(name, data)
        })
        .build()
}

/// Builder for ZIP fixtures with files, directories, and timestamps.
///
/// # Examples
///
/// ```
/// use ziptrack_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("subdir/")
///     .add_file("subdir/file.txt", b"content")
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn stored() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644)
    }

    /// Adds a stored file entry.
    #[must_use]
    pub fn add_file(mut self, name: &str, data: &[u8]) -> Self {
        self.zip.start_file(name, Self::stored()).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a stored file entry with an explicit modification time.
    #[must_use]
    pub fn add_file_with_mtime(mut self, name: &str, data: &[u8], mtime: zip::DateTime) -> Self {
        let options = Self::stored().last_modified_time(mtime);
        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(name, options).unwrap();
        self
    }

    /// Returns the finished archive bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Writes the finished archive to `path`.
    pub fn write_to(self, path: impl AsRef<Path>) {
        std::fs::write(path, self.build()).unwrap();
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress sink that keeps every reported value.
#[derive(Debug, Default, Clone)]
pub struct ProgressRecorder {
    values: Vec<f64>,
}

impl ProgressRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All reported values in order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Last reported value, if any.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Returns `true` if no value ever decreased.
    #[must_use]
    pub fn is_non_decreasing(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Returns `true` if every value lies in `[0, 100]`.
    #[must_use]
    pub fn in_range(&self) -> bool {
        self.values.iter().all(|v| (0.0..=100.0).contains(v))
    }
}

impl ProgressSink for ProgressRecorder {
    fn report(&mut self, percent: f64) {
        self.values.push(percent);
    }
}
