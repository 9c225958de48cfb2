//! JSON output formatter for machine-readable results.
//!
//! Prints exactly one line of JSON per archive. Entry events are folded into
//! the final document through the report.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use untar_core::ExtractionError;
use untar_core::ExtractionReport;
use untar_core::formats::Entry;

#[derive(Debug, Serialize)]
pub struct ExtractionOutput {
    pub files_extracted: usize,
    pub directories_created: usize,
    pub entries_skipped: usize,
    pub entries_failed: usize,
    pub bytes_written: u64,
    pub records_read: u64,
    pub duration_ms: u128,
    pub warnings: Vec<String>,
}

impl ExtractionOutput {
    fn new(report: &ExtractionReport) -> Self {
        Self {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            entries_skipped: report.entries_skipped,
            entries_failed: report.entries_failed,
            bytes_written: report.bytes_written,
            records_read: report.records_read,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_archive_start(&self, _archive: &Path) {}

    fn format_entry(&self, _entry: &Entry) {}

    fn format_archive_end(&self, _archive: &Path) {}

    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()> {
        let data = ExtractionOutput::new(report);
        Self::output(&JsonOutput::success("extract", archive, data))
    }

    fn format_error(&self, archive: &Path, error: &anyhow::Error) {
        let output = JsonOutput::error("extract", archive, error.to_string());
        if let Err(e) = Self::output(&output) {
            eprintln!("Failed to output JSON error: {e}");
        }
    }

    // Entry errors and warnings are carried by the report.
    fn format_entry_error(&self, _error: &ExtractionError) {}

    fn format_warning(&self, _message: &str) {}
}
