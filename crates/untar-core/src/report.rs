//! Extraction operation reporting.

use std::path::Path;
use std::time::Duration;

use crate::ExtractionError;
use crate::formats::Entry;

/// Report of one archive's extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of regular files written completely.
    pub files_extracted: usize,

    /// Number of directory entries processed.
    pub directories_created: usize,

    /// Number of unsupported entries (links, devices, FIFOs) skipped.
    pub entries_skipped: usize,

    /// Number of entries that failed to materialize or write.
    pub entries_failed: usize,

    /// Total payload bytes written to disk.
    pub bytes_written: u64,

    /// Number of 512-byte records consumed, end marker included.
    pub records_read: u64,

    /// Duration of the extraction.
    pub duration: Duration,

    /// Warnings and entry-level failures, in stream order.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns total number of entries read from the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_extracted + self.directories_created + self.entries_skipped + self.entries_failed
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Callback trait for progress reporting during extraction.
///
/// The driver calls these hooks in stream order. Entry-level failures and
/// warnings arrive here as they happen; archive-fatal errors are returned
/// from the extraction call instead, and `on_archive_end` is then not called.
///
/// # Examples
///
/// ```
/// use untar_core::ExtractionError;
/// use untar_core::ProgressCallback;
/// use untar_core::formats::Entry;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_archive_start(&mut self, archive: &Path) {
///         println!("Extracting from {}", archive.display());
///     }
///
///     fn on_entry_start(&mut self, entry: &Entry) {
///         println!(" {} {}", entry.entry_type, entry.path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _entry: &Entry) {}
///
///     fn on_warning(&mut self, message: &str) {
///         eprintln!("{message}");
///     }
///
///     fn on_entry_error(&mut self, error: &ExtractionError) {
///         eprintln!("{error}");
///     }
///
///     fn on_archive_end(&mut self, archive: &Path) {
///         println!("End of {}", archive.display());
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before the first record of an archive is read.
    fn on_archive_start(&mut self, archive: &Path);

    /// Called when a validated header has been decoded.
    fn on_entry_start(&mut self, entry: &Entry);

    /// Called after payload bytes were written to an output file.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry's payload has been fully drained.
    fn on_entry_complete(&mut self, entry: &Entry);

    /// Called for entries that are recognized but not extracted.
    fn on_warning(&mut self, message: &str);

    /// Called for non-fatal entry failures.
    fn on_entry_error(&mut self, error: &ExtractionError);

    /// Called when the end-of-archive marker has been reached.
    fn on_archive_end(&mut self, archive: &Path);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_archive_start(&mut self, _archive: &Path) {}

    fn on_entry_start(&mut self, _entry: &Entry) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _entry: &Entry) {}

    fn on_warning(&mut self, _message: &str) {}

    fn on_entry_error(&mut self, _error: &ExtractionError) {}

    fn on_archive_end(&mut self, _archive: &Path) {}
}
