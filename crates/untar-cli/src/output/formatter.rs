//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use untar_core::ExtractionError;
use untar_core::ExtractionReport;
use untar_core::formats::Entry;

/// Common output formatter trait
///
/// Per-archive events arrive while extraction runs; the result or error
/// arrives once the archive is finished.
pub trait OutputFormatter: Send + Sync {
    /// Called before the first record of an archive is read
    fn format_archive_start(&self, archive: &Path);

    /// Called for every entry taken from the archive
    fn format_entry(&self, entry: &Entry);

    /// Called after the end-of-archive marker
    fn format_archive_end(&self, archive: &Path);

    /// Format extraction result
    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()>;

    /// Format an error that aborted an archive
    fn format_error(&self, archive: &Path, error: &anyhow::Error);

    /// Format an entry-level failure that did not stop extraction
    fn format_entry_error(&self, error: &ExtractionError);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub archive: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, archive: &Path, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            archive: archive.display().to_string(),
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(
        operation: impl Into<String>,
        archive: &Path,
        error: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            archive: archive.display().to_string(),
            data: None,
            error: Some(error.into()),
        }
    }
}
