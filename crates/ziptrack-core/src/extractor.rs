//! Archive extraction: every entry written out under a destination directory.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use filetime::FileTime;
use tracing::debug;
use tracing::info;
use zip::ZipArchive;

use crate::ArchiveError;
use crate::ExtractOptions;
use crate::ExtractReport;
use crate::ProgressSinks;
use crate::Result;
use crate::Transfer;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use crate::lock::ArchiveLock;
use crate::timestamp::from_zip_datetime;

/// Where an archive entry lands on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    File(PathBuf),
    Directory(PathBuf),
    SkippedDirectory,
}

/// Extracts every entry of `archive_path` into `dest`.
///
/// Entries are processed in archive order. With
/// [`ExtractOptions::respect_stored_dirs`] a name such as `subdir/file.txt`
/// lands at `dest/subdir/file.txt`; otherwise at `dest/file.txt`, and later
/// entries with the same file name overwrite earlier ones.
///
/// # Errors
///
/// Returns an error if:
/// - The archive is missing, locked for writing, or not a ZIP file
/// - An entry name is absolute or climbs out of `dest`
/// - An output directory cannot be created
/// - Reading an entry or writing its file fails
///
/// Files extracted before the failure are left on disk.
///
/// # Examples
///
/// ```no_run
/// use ziptrack_core::{ExtractOptions, ProgressSinks};
/// use ziptrack_core::extractor::extract_archive;
///
/// let options = ExtractOptions::default().with_respect_stored_dirs(true);
/// let report = extract_archive("in.zip", "out", &options, &mut ProgressSinks::none())?;
/// println!("extracted {} files", report.files_extracted);
/// # Ok::<(), ziptrack_core::ArchiveError>(())
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest: Q,
    options: &ExtractOptions,
    sinks: &mut ProgressSinks<'_>,
) -> Result<ExtractReport> {
    let archive_path = archive_path.as_ref();
    let dest = dest.as_ref();
    let start = Instant::now();

    let lock = ArchiveLock::shared(archive_path)?;
    let mut archive = ZipArchive::new(lock.file()).map_err(|e| ArchiveError::ArchiveOpen {
        path: lock.path().to_path_buf(),
        reason: e.to_string(),
    })?;

    let total = declared_total(&mut archive)?;
    info!(
        archive = %archive_path.display(),
        dest = %dest.display(),
        entries = archive.len(),
        total_bytes = total,
        "extracting archive"
    );

    make_dir(dest)?;

    let mut report = ExtractReport::new();
    let mut transfer = Transfer::new(total);
    let mut buffer = CopyBuffer::with_chunk_size(options.chunk_size);
    transfer.begin(sinks);

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        match resolve_target(dest, &name, entry.enclosed_name(), entry.is_dir(), options)? {
            Target::SkippedDirectory => {
                debug!(entry = %name, "skipping directory entry");
                report.directories_skipped += 1;
            }
            Target::Directory(path) => {
                debug!(entry = %name, path = %path.display(), "creating directory");
                make_dir(&path)?;
                report.directories_created += 1;
            }
            Target::File(path) => {
                debug!(entry = %name, path = %path.display(), bytes = entry.size(), "extracting entry");
                if let Some(parent) = path.parent() {
                    make_dir(parent)?;
                }

                let declared = entry.size();
                let output = File::create(&path)?;
                let mut writer = BufWriter::new(output);
                copy_with_progress(
                    &mut entry,
                    &mut writer,
                    declared,
                    &mut transfer,
                    sinks,
                    &mut buffer,
                )?;
                writer.flush()?;
                drop(writer);

                if let Some(mtime) = entry.last_modified().and_then(from_zip_datetime) {
                    filetime::set_file_mtime(&path, FileTime::from_system_time(mtime))?;
                }

                #[cfg(unix)]
                if options.preserve_permissions
                    && let Some(mode) = entry.unix_mode()
                {
                    use std::os::unix::fs::PermissionsExt;
                    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))?;
                }

                report.files_extracted += 1;
                report.bytes_written += declared;
            }
        }
    }

    transfer.finish(sinks);
    report.duration = start.elapsed();

    info!(
        archive = %archive_path.display(),
        files = report.files_extracted,
        directories = report.directories_created,
        bytes = report.bytes_written,
        "archive extracted"
    );

    Ok(report)
}

/// Sums the declared uncompressed sizes of all file entries.
fn declared_total<R: std::io::Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> Result<u64> {
    let mut total = 0u64;
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        if !entry.is_dir() {
            total = total.saturating_add(entry.size());
        }
    }
    Ok(total)
}

fn resolve_target(
    dest: &Path,
    name: &str,
    enclosed: Option<PathBuf>,
    is_dir: bool,
    options: &ExtractOptions,
) -> Result<Target> {
    let unsafe_name = || ArchiveError::UnsafeEntryName {
        name: name.to_string(),
    };
    let relative = enclosed.ok_or_else(unsafe_name)?;

    if is_dir {
        return Ok(if options.respect_stored_dirs {
            Target::Directory(dest.join(relative))
        } else {
            Target::SkippedDirectory
        });
    }

    let nested = relative.parent().is_some_and(|p| !p.as_os_str().is_empty());
    if options.respect_stored_dirs && nested {
        return Ok(Target::File(dest.join(relative)));
    }

    let file_name = relative.file_name().ok_or_else(unsafe_name)?;
    Ok(Target::File(dest.join(file_name)))
}

fn make_dir(path: &Path) -> Result<()> {
    create_dir_all(path).map_err(|source| ArchiveError::DestinationDir {
        path: path.to_path_buf(),
        source,
    })
}
