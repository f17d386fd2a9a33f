//! High-level entry points for building and extracting archives.

use std::path::Path;

use crate::BuildOptions;
use crate::BuildReport;
use crate::ExtractOptions;
use crate::ExtractReport;
use crate::ProgressSink;
use crate::ProgressSinks;
use crate::Result;
use crate::builder::build_archive;
use crate::extractor::extract_archive;

/// Builds (or updates) a ZIP archive from a list of files.
///
/// The archive is created when missing and updated otherwise. Entries use the
/// bare file name unless `preserve_full_path` is set. Both sinks are optional;
/// `item` observes the file being copied, `total` the whole operation.
///
/// # Arguments
///
/// * `archive_path` - Path of the ZIP file to create or update
/// * `sources` - Regular files to add, in entry order
/// * `item` - Per-file progress observer
/// * `total` - Aggregate progress observer
/// * `preserve_full_path` - Store full paths instead of bare names
///
/// # Errors
///
/// Returns an error if any source is missing, the archive is locked or
/// unreadable, or an I/O operation fails. See [`build_archive`].
///
/// # Examples
///
/// ```no_run
/// use ziptrack_core::build;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut on_file = |p: f64| println!("file {p:.2}%");
/// let mut on_total = |p: f64| println!("total {p:.2}%");
/// let report = build(
///     "backup.zip",
///     &["notes.txt", "photo.jpg"],
///     Some(&mut on_file),
///     Some(&mut on_total),
///     false,
/// )?;
/// println!("{} entries", report.total_entries());
/// # Ok(())
/// # }
/// ```
pub fn build<'a, P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    sources: &[Q],
    item: Option<&'a mut dyn ProgressSink>,
    total: Option<&'a mut dyn ProgressSink>,
    preserve_full_path: bool,
) -> Result<BuildReport> {
    let options = BuildOptions::default().with_preserve_full_path(preserve_full_path);
    build_with_options(
        archive_path,
        sources,
        &options,
        &mut ProgressSinks::new(item, total),
    )
}

/// Builds (or updates) a ZIP archive with explicit options.
///
/// # Errors
///
/// See [`build_archive`].
pub fn build_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    sources: &[Q],
    options: &BuildOptions,
    sinks: &mut ProgressSinks<'_>,
) -> Result<BuildReport> {
    build_archive(archive_path, sources, options, sinks)
}

/// Extracts every entry of a ZIP archive into `dest`.
///
/// With `respect_stored_dirs` the stored directory structure is recreated;
/// otherwise all files land directly in `dest`.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, an entry name is unsafe,
/// or an I/O operation fails. See [`extract_archive`].
///
/// # Examples
///
/// ```no_run
/// use ziptrack_core::extract;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract("backup.zip", "restore", None, None, true)?;
/// println!("{} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract<'a, P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest: Q,
    item: Option<&'a mut dyn ProgressSink>,
    total: Option<&'a mut dyn ProgressSink>,
    respect_stored_dirs: bool,
) -> Result<ExtractReport> {
    let options = ExtractOptions::default().with_respect_stored_dirs(respect_stored_dirs);
    extract_with_options(
        archive_path,
        dest,
        &options,
        &mut ProgressSinks::new(item, total),
    )
}

/// Extracts a ZIP archive with explicit options.
///
/// # Errors
///
/// See [`extract_archive`].
pub fn extract_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest: Q,
    options: &ExtractOptions,
    sinks: &mut ProgressSinks<'_>,
) -> Result<ExtractReport> {
    extract_archive(archive_path, dest, options, sinks)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_then_extract() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, "round trip").unwrap();
        let archive = temp.path().join("out.zip");
        let dest = temp.path().join("dest");

        let built = build(&archive, &[&source], None, None, false).unwrap();
        assert_eq!(built.files_added, 1);

        let extracted = extract(&archive, &dest, None, None, false).unwrap();
        assert_eq!(extracted.files_extracted, 1);
        assert_eq!(fs::read(dest.join("a.txt")).unwrap(), b"round trip");
    }

    #[test]
    fn test_build_with_closure_sinks() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, "abc").unwrap();
        let archive = temp.path().join("out.zip");

        let mut last_total = 0.0;
        let mut item_calls = 0;
        {
            let mut on_item = |_: f64| item_calls += 1;
            let mut on_total = |p: f64| last_total = p;
            build(
                &archive,
                &[&source],
                Some(&mut on_item),
                Some(&mut on_total),
                false,
            )
            .unwrap();
        }

        assert!((last_total - 100.0).abs() < f64::EPSILON);
        assert_eq!(item_calls, 2);
    }

    #[test]
    fn test_extract_with_sinks_from_different_scopes() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, "scoped").unwrap();
        let archive = temp.path().join("out.zip");
        build(&archive, &[&source], None, None, false).unwrap();

        let mut item_values = Vec::new();
        let mut on_item = |p: f64| item_values.push(p);
        let total_values = {
            let mut values = Vec::new();
            let mut on_total = |p: f64| values.push(p);
            extract(
                &archive,
                temp.path().join("dest"),
                Some(&mut on_item),
                Some(&mut on_total),
                false,
            )
            .unwrap();
            values
        };

        assert_eq!(item_values.first(), Some(&0.0));
        assert_eq!(item_values.last(), Some(&100.0));
        assert_eq!(total_values.last(), Some(&100.0));
    }
}
