//! Build command implementation.

use crate::cli::BuildArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use ziptrack_core::BuildOptions;
use ziptrack_core::ProgressSinks;
use ziptrack_core::build_with_options;

pub fn execute(args: &BuildArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let mut options = BuildOptions::default()
        .with_preserve_full_path(args.full_paths)
        .with_compression_level(Some(args.compression_level));
    if let Some(chunk_size) = args.chunk_size {
        options = options.with_chunk_size(chunk_size);
    }

    // Use progress bars if TTY is detected (not quiet, not JSON, is terminal)
    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Building");
        add_archive_context(
            build_with_options(&args.archive, &args.sources, &options, &mut progress.sinks()),
            &args.archive,
        )?
    } else {
        add_archive_context(
            build_with_options(
                &args.archive,
                &args.sources,
                &options,
                &mut ProgressSinks::none(),
            ),
            &args.archive,
        )?
    };

    if report.entries_replaced > 0 {
        formatter.format_warning(&format!(
            "replaced {} existing entr{} in {}",
            report.entries_replaced,
            if report.entries_replaced == 1 { "y" } else { "ies" },
            args.archive.display()
        ));
    }

    formatter.format_build_result(&args.archive, &report)?;

    Ok(())
}
