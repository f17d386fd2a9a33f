//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;
use ziptrack_core::ExtractOptions;
use ziptrack_core::ProgressSinks;
use ziptrack_core::extract_with_options;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut options = ExtractOptions::default()
        .with_respect_stored_dirs(args.respect_dirs)
        .with_preserve_permissions(args.preserve_permissions);
    if let Some(chunk_size) = args.chunk_size {
        options = options.with_chunk_size(chunk_size);
    }

    // Use progress bars if TTY is detected (not quiet, not JSON, is terminal)
    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        add_archive_context(
            extract_with_options(&args.archive, &output_dir, &options, &mut progress.sinks()),
            &args.archive,
        )?
    } else {
        add_archive_context(
            extract_with_options(
                &args.archive,
                &output_dir,
                &options,
                &mut ProgressSinks::none(),
            ),
            &args.archive,
        )?
    };

    formatter.format_extraction_result(&report)?;

    Ok(())
}
