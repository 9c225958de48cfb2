//! Progress reporting for the extract command.

use crate::output::OutputFormatter;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use std::path::Path;
use std::time::Duration;
use untar_core::ExtractionError;
use untar_core::ProgressCallback;
use untar_core::formats::Entry;

/// Bridges extraction events to the output formatter.
///
/// When stdout is a terminal a byte-count spinner runs for the duration of
/// each archive. Formatter output is printed with the spinner suspended so
/// lines are not overdrawn.
pub struct CliProgress<'a> {
    formatter: &'a dyn OutputFormatter,
    bar: Option<ProgressBar>,
    bytes_written: u64,
    show_bar: bool,
}

impl<'a> CliProgress<'a> {
    /// Creates a progress adapter; the spinner is enabled on a TTY.
    #[must_use]
    pub fn new(formatter: &'a dyn OutputFormatter, quiet: bool, json: bool) -> Self {
        Self {
            formatter,
            bar: None,
            bytes_written: 0,
            show_bar: Self::should_show(quiet, json),
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show(quiet: bool, json: bool) -> bool {
        !quiet && !json && Term::stdout().is_term()
    }

    fn spinner(archive: &Path) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({bytes})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .with_key("bytes", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_bytes(state.pos())).unwrap_or(());
                }),
        );
        bar.set_message(archive.display().to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }

    fn suspended(&self, f: impl FnOnce()) {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

impl Drop for CliProgress<'_> {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl ProgressCallback for CliProgress<'_> {
    fn on_archive_start(&mut self, archive: &Path) {
        self.bytes_written = 0;
        self.formatter.format_archive_start(archive);
        if self.show_bar {
            self.bar = Some(Self::spinner(archive));
        }
    }

    fn on_entry_start(&mut self, entry: &Entry) {
        let formatter = self.formatter;
        self.suspended(|| formatter.format_entry(entry));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        if let Some(bar) = &self.bar {
            bar.set_position(self.bytes_written);
        }
    }

    fn on_entry_complete(&mut self, _entry: &Entry) {}

    fn on_warning(&mut self, message: &str) {
        let formatter = self.formatter;
        self.suspended(|| formatter.format_warning(message));
    }

    fn on_entry_error(&mut self, error: &ExtractionError) {
        let formatter = self.formatter;
        self.suspended(|| formatter.format_entry_error(error));
    }

    fn on_archive_end(&mut self, archive: &Path) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.formatter.format_archive_end(archive);
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
