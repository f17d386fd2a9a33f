//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use ziptrack_core::BuildReport;
use ziptrack_core::ExtractReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct BuildOutput {
    archive: String,
    mode: &'static str,
    files_added: usize,
    entries_replaced: usize,
    entries_retained: usize,
    total_entries: usize,
    bytes_read: u64,
    archive_size: u64,
    compression_ratio: f64,
    duration_ms: u128,
}

impl BuildOutput {
    fn new(archive: &Path, report: &BuildReport) -> Self {
        Self {
            archive: archive.display().to_string(),
            mode: report.mode.as_str(),
            files_added: report.files_added,
            entries_replaced: report.entries_replaced,
            entries_retained: report.entries_retained,
            total_entries: report.total_entries(),
            bytes_read: report.bytes_read,
            archive_size: report.archive_size,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_build_result(&self, archive: &Path, report: &BuildReport) -> Result<()> {
        let output = JsonOutput::success("build", BuildOutput::new(archive, report));
        Self::output(&output)
    }

    fn format_extraction_result(&self, report: &ExtractReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            files_extracted: usize,
            directories_created: usize,
            directories_skipped: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = ExtractionOutput {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            directories_skipped: report.directories_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        // stdout carries only the JSON document
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ziptrack_core::ArchiveMode;

    #[test]
    fn test_build_output_fields() {
        let mut report = BuildReport::new(ArchiveMode::Update);
        report.files_added = 2;
        report.entries_retained = 1;

        let json = serde_json::to_value(JsonOutput::success(
            "build",
            BuildOutput::new(Path::new("out.zip"), &report),
        ))
        .unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["mode"], "update");
        assert_eq!(json["data"]["total_entries"], 3);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_output_fields() {
        let json = serde_json::to_value(JsonOutput::error("extract", "boom")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
