//! Archive building: one ZIP entry per source file.
//!
//! A build walks through `NotStarted -> OpeningArchive -> (CreatingEntry ->
//! Copying) x N -> Closing -> Completed`. Any phase can end in `Failed`; the
//! phase reached is logged with the error.

use std::collections::HashSet;
use std::fs::File;
use std::io::Seek;
use std::io::Write;
use std::io::{self};
use std::path::Component;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ArchiveError;
use crate::ArchiveMode;
use crate::BuildOptions;
use crate::BuildReport;
use crate::ProgressSinks;
use crate::Result;
use crate::Transfer;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use crate::lock::ArchiveLock;
use crate::source::SourceFile;
use crate::source::collect_sources;
use crate::source::sum_len;
use crate::timestamp::to_zip_datetime;

/// Lifecycle phase of a build, recorded for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Sources not yet inspected.
    NotStarted,
    /// Acquiring and opening the archive file.
    OpeningArchive,
    /// Writing an entry header.
    CreatingEntry,
    /// Streaming entry bytes.
    Copying,
    /// Finishing the central directory and flushing.
    Closing,
    /// Archive written and closed.
    Completed,
}

/// Builds (or updates) the ZIP archive at `archive_path` from `sources`.
///
/// Entries appear in the order of `sources`. In [`ArchiveMode::Update`],
/// entries already in the archive are kept in their original order unless a
/// source maps to the same stored name, in which case the old entry is
/// replaced; new entries follow. Updates are staged in a temporary file next
/// to the archive and only copied over it once complete.
///
/// # Errors
///
/// Returns an error if:
/// - A source is missing or unreadable (before the archive is touched)
/// - Two sources map to the same entry name
/// - The archive is locked by another operation
/// - An existing archive cannot be parsed
/// - Any read or write fails while adding entries
///
/// On failure no report is returned. A freshly created archive is removed;
/// an updated archive keeps its previous content unless the final copy-back
/// itself fails.
///
/// # Examples
///
/// ```no_run
/// use ziptrack_core::{BuildOptions, ProgressSinks};
/// use ziptrack_core::builder::build_archive;
///
/// let mut on_total = |p: f64| println!("{p:.2}%");
/// let mut sinks = ProgressSinks::new(None, Some(&mut on_total));
/// let report = build_archive("out.zip", &["a.txt", "b.txt"], &BuildOptions::default(), &mut sinks)?;
/// println!("added {} files", report.files_added);
/// # Ok::<(), ziptrack_core::ArchiveError>(())
/// ```
pub fn build_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    sources: &[Q],
    options: &BuildOptions,
    sinks: &mut ProgressSinks<'_>,
) -> Result<BuildReport> {
    let archive_path = archive_path.as_ref();
    let start = Instant::now();
    trace!(phase = ?BuildPhase::NotStarted, archive = %archive_path.display());

    let sources = collect_sources(sources)?;
    build_from_sources(archive_path, &sources, options, sinks, start)
}

/// Builds from sources that were already stat'ed.
fn build_from_sources(
    archive_path: &Path,
    sources: &[SourceFile],
    options: &BuildOptions,
    sinks: &mut ProgressSinks<'_>,
    start: Instant,
) -> Result<BuildReport> {
    let mut phase = BuildPhase::NotStarted;
    let names = entry_names(sources, options.preserve_full_path)?;
    let total = sum_len(sources);
    let mode = ArchiveMode::select(archive_path);

    info!(
        archive = %archive_path.display(),
        %mode,
        files = sources.len(),
        total_bytes = total,
        "building archive"
    );

    phase = BuildPhase::OpeningArchive;
    trace!(?phase);
    let lock = ArchiveLock::exclusive(archive_path)?;
    let mode = locked_mode(mode, &lock)?;

    let mut report = BuildReport::new(mode);
    let result = write_archive(
        &lock,
        mode,
        sources,
        &names,
        options,
        sinks,
        &mut report,
        &mut phase,
    );

    if let Err(e) = result {
        warn!(?phase, archive = %archive_path.display(), error = %e, "build failed");
        drop(lock);
        if mode == ArchiveMode::Create
            && let Err(cleanup) = std::fs::remove_file(archive_path)
        {
            warn!(
                archive = %archive_path.display(),
                error = %cleanup,
                "failed to remove partial archive"
            );
        }
        return Err(e);
    }

    report.duration = start.elapsed();
    phase = BuildPhase::Completed;
    trace!(?phase);
    info!(
        archive = %archive_path.display(),
        files = report.files_added,
        retained = report.entries_retained,
        replaced = report.entries_replaced,
        archive_size = report.archive_size,
        "archive built"
    );

    Ok(report)
}

/// Re-checks the mode once the lock is held.
///
/// A target that another build created and filled between selection and
/// locking is updated, never truncated.
fn locked_mode(selected: ArchiveMode, lock: &ArchiveLock) -> Result<ArchiveMode> {
    if selected == ArchiveMode::Create && lock.file().metadata()?.len() > 0 {
        debug!(archive = %lock.path().display(), "archive appeared before lock, updating");
        return Ok(ArchiveMode::Update);
    }
    Ok(selected)
}

#[allow(clippy::too_many_arguments)]
fn write_archive(
    lock: &ArchiveLock,
    mode: ArchiveMode,
    sources: &[SourceFile],
    names: &[String],
    options: &BuildOptions,
    sinks: &mut ProgressSinks<'_>,
    report: &mut BuildReport,
    phase: &mut BuildPhase,
) -> Result<()> {
    let file = lock.file();
    let mut transfer = Transfer::new(sum_len(sources));
    let mut buffer = CopyBuffer::with_chunk_size(options.chunk_size);
    transfer.begin(sinks);

    let has_entries = mode == ArchiveMode::Update && file.metadata()?.len() > 0;

    if has_entries {
        let mut existing = ZipArchive::new(file).map_err(|e| ArchiveError::ArchiveOpen {
            path: lock.path().to_path_buf(),
            reason: e.to_string(),
        })?;

        let staging = tempfile::tempfile_in(parent_dir(lock.path()))?;
        let mut zip = ZipWriter::new(staging);
        retain_entries(&mut existing, &mut zip, names, report)?;
        drop(existing);

        let mut ctx = EntryContext {
            transfer: &mut transfer,
            sinks: &mut *sinks,
            buffer: &mut buffer,
            report: &mut *report,
            phase: &mut *phase,
        };
        add_sources(&mut zip, sources, names, options, &mut ctx)?;

        *ctx.phase = BuildPhase::Closing;
        trace!(phase = ?ctx.phase);
        let mut staged = zip.finish()?;
        replace_contents(file, &mut staged)?;
    } else {
        file.set_len(0)?;
        let mut zip = ZipWriter::new(file);

        let mut ctx = EntryContext {
            transfer: &mut transfer,
            sinks: &mut *sinks,
            buffer: &mut buffer,
            report: &mut *report,
            phase: &mut *phase,
        };
        add_sources(&mut zip, sources, names, options, &mut ctx)?;

        *ctx.phase = BuildPhase::Closing;
        trace!(phase = ?ctx.phase);
        zip.finish()?;
    }

    file.sync_all()?;
    report.archive_size = file.metadata()?.len();
    transfer.finish(sinks);

    Ok(())
}

/// Mutable state threaded through every entry of one build.
struct EntryContext<'a, 'b> {
    transfer: &'a mut Transfer,
    sinks: &'a mut ProgressSinks<'b>,
    buffer: &'a mut CopyBuffer,
    report: &'a mut BuildReport,
    phase: &'a mut BuildPhase,
}

fn add_sources<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    sources: &[SourceFile],
    names: &[String],
    options: &BuildOptions,
    ctx: &mut EntryContext<'_, '_>,
) -> Result<()> {
    for (source, name) in sources.iter().zip(names) {
        *ctx.phase = BuildPhase::CreatingEntry;
        debug!(entry = %name, source = %source.path.display(), bytes = source.len, "adding entry");

        zip.start_file(name.as_str(), entry_options(source, options))?;
        let mut input = File::open(&source.path)?;

        *ctx.phase = BuildPhase::Copying;
        copy_with_progress(
            &mut input,
            zip,
            source.len,
            ctx.transfer,
            ctx.sinks,
            ctx.buffer,
        )?;

        ctx.report.files_added += 1;
        ctx.report.bytes_read += source.len;
    }

    Ok(())
}

/// Raw-copies every existing entry that is not being re-added.
fn retain_entries<R, W>(
    existing: &mut ZipArchive<R>,
    zip: &mut ZipWriter<W>,
    names: &[String],
    report: &mut BuildReport,
) -> Result<()>
where
    R: io::Read + Seek,
    W: Write + Seek,
{
    let incoming: HashSet<&str> = names.iter().map(String::as_str).collect();

    for i in 0..existing.len() {
        let entry = existing.by_index_raw(i)?;
        if incoming.contains(entry.name()) {
            debug!(entry = entry.name(), "replacing existing entry");
            report.entries_replaced += 1;
            continue;
        }
        zip.raw_copy_file(entry)?;
        report.entries_retained += 1;
    }

    Ok(())
}

fn entry_options(source: &SourceFile, options: &BuildOptions) -> SimpleFileOptions {
    let mut file_options =
        SimpleFileOptions::default().large_file(source.len >= u64::from(u32::MAX));

    file_options = if options.is_stored() {
        file_options.compression_method(CompressionMethod::Stored)
    } else {
        file_options
            .compression_method(CompressionMethod::Deflated)
            .compression_level(options.compression_level.map(i64::from))
    };

    match source.modified.and_then(to_zip_datetime) {
        Some(dt) => file_options = file_options.last_modified_time(dt),
        None => warn!(
            source = %source.path.display(),
            "modification time outside ZIP range, storing 1980-01-01"
        ),
    }

    if options.preserve_permissions
        && let Some(mode) = source.mode
    {
        file_options = file_options.unix_permissions(mode);
    }

    file_options
}

/// Computes the stored name of every source, rejecting collisions.
fn entry_names(sources: &[SourceFile], preserve_full_path: bool) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(sources.len());
    let mut names = Vec::with_capacity(sources.len());

    for source in sources {
        let name = if preserve_full_path {
            full_path_name(&source.path)?
        } else {
            normalize_zip_path(source.file_name())?
        };
        if !seen.insert(name.clone()) {
            return Err(ArchiveError::DuplicateEntry { name });
        }
        names.push(name);
    }

    Ok(names)
}

/// Stored name for a source kept under its full path.
///
/// The path is made absolute, then the root and any drive prefix are
/// dropped, so `/home/me/a.txt` becomes `home/me/a.txt`.
fn full_path_name(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)?;
    let mut parts: Vec<&str> = Vec::new();

    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                ArchiveError::Io(io::Error::other(format!(
                    "path is not valid UTF-8: {}",
                    path.display()
                )))
            })?),
        }
    }

    Ok(parts.join("/"))
}

/// Converts a relative path to ZIP form (forward slashes).
fn normalize_zip_path(path: &Path) -> Result<String> {
    let path_str = path.to_str().ok_or_else(|| {
        ArchiveError::Io(io::Error::other(format!(
            "path is not valid UTF-8: {}",
            path.display()
        )))
    })?;

    #[cfg(windows)]
    let normalized = path_str.replace('\\', "/");

    #[cfg(not(windows))]
    let normalized = path_str.to_string();

    Ok(normalized)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Overwrites the locked archive with the staged container.
///
/// Writes through the same handle so the lock stays on the file callers see.
fn replace_contents(target: &File, staged: &mut File) -> Result<()> {
    staged.rewind()?;
    let mut target = target;
    target.set_len(0)?;
    target.rewind()?;
    io::copy(staged, &mut target)?;
    target.flush()?;
    Ok(())
}
