//! Human-readable output formatter with colors and styling.
//!
//! Progress lines go to stdout, diagnostics to stderr.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use untar_core::EntryType;
use untar_core::ExtractionError;
use untar_core::ExtractionReport;
use untar_core::formats::Entry;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled_stderr(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    /// Progress line for an entry, `None` for skipped types.
    fn entry_line(entry: &Entry) -> Option<String> {
        match entry.entry_type {
            EntryType::Directory => Some(format!(" Extracting dir {}", entry.path.display())),
            EntryType::File => Some(format!(" Extracting file {}", entry.path.display())),
            _ => None,
        }
    }

    fn progress(&self, line: &str) {
        if !self.quiet {
            let _ = self.out.write_line(line);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_archive_start(&self, archive: &Path) {
        self.progress(&format!("Extracting from {}", archive.display()));
    }

    fn format_entry(&self, entry: &Entry) {
        if let Some(line) = Self::entry_line(entry) {
            self.progress(&line);
        }
    }

    fn format_archive_end(&self, archive: &Path) {
        self.progress(&format!("End of {}", archive.display()));
    }

    fn format_extraction_result(&self, _archive: &Path, report: &ExtractionReport) -> Result<()> {
        if !self.verbose {
            return Ok(());
        }

        let _ = self
            .out
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .out
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self
            .out
            .write_line(&format!("  Skipped: {}", report.entries_skipped));
        if report.entries_failed > 0 {
            let _ = self
                .out
                .write_line(&format!("  Failed: {}", report.entries_failed));
        }
        let _ = self.out.write_line(&format!(
            "  Total size: {}",
            humanize_bytes(report.bytes_written)
        ));
        let _ = self
            .out
            .write_line(&format!("  Records: {}", report.records_read));
        let _ = self
            .out
            .write_line(&format!("  Duration: {:?}", report.duration));

        Ok(())
    }

    fn format_error(&self, _archive: &Path, error: &anyhow::Error) {
        let message = error.to_string();
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {}", style("✗").red().bold(), style(message).red()));
        } else {
            let _ = self.err.write_line(&message);
        }
    }

    fn format_entry_error(&self, error: &ExtractionError) {
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {error}", style("✗").red().bold()));
        } else {
            let _ = self.err.write_line(&error.to_string());
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {}", style("⚠").yellow().bold(), message));
        } else {
            let _ = self.err.write_line(message);
        }
    }
}
