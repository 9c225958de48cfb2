//! Extraction driver.
//!
//! One archive is processed as a loop over entries:
//!
//! 1. read the next record; an all-zero record ends the archive,
//! 2. validate its checksum and decode the entry,
//! 3. dispatch on the entry type, creating a directory or an output file,
//! 4. stream `ceil(size / 512)` payload records, writing the meaningful bytes
//!    when an output file exists and discarding them otherwise.
//!
//! Short reads and checksum failures abort the archive. Failures to create
//! or write an entry are reported and the payload is still drained, so the
//! next header is always read from the right position.

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use log::debug;
use log::warn;

use super::materialize::create_directory;
use super::materialize::create_file;
use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::formats::BLOCK_SIZE;
use crate::formats::Entry;
use crate::formats::HeaderBlock;
use crate::formats::RecordReader;
use crate::formats::is_end_of_archive;
use crate::types::DestDir;
use crate::types::EntryType;

/// Extracts ustar streams into a destination directory.
///
/// # Examples
///
/// ```no_run
/// use untar_core::ExtractionConfig;
/// use untar_core::Extractor;
/// use untar_core::NoopProgress;
/// use untar_core::types::DestDir;
/// use std::fs::File;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = Extractor::new(DestDir::new("/tmp/out")?, ExtractionConfig::default());
/// let file = File::open("archive.tar")?;
/// let report = extractor.extract(file, Path::new("archive.tar"), &mut NoopProgress)?;
/// println!("{} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    dest: DestDir,
    config: ExtractionConfig,
}

impl Extractor {
    /// Creates an extractor writing into `dest`.
    #[must_use]
    pub const fn new(dest: DestDir, config: ExtractionConfig) -> Self {
        Self { dest, config }
    }

    /// Destination directory entries are extracted into.
    #[must_use]
    pub const fn dest(&self) -> &DestDir {
        &self.dest
    }

    /// Extracts one archive stream, labelled `archive` in diagnostics.
    ///
    /// The stream is read forward only. On error, whatever follows the
    /// failing record is left unread.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ShortRead`] if the stream ends inside a
    /// record, [`ExtractionError::ChecksumMismatch`] for a corrupted header,
    /// or [`ExtractionError::Io`] if reading fails. Entry-level failures are
    /// not returned; they go to `progress` and the report.
    pub fn extract<R: Read>(
        &self,
        source: R,
        archive: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut reader = RecordReader::new(source, archive);
        let mut report = ExtractionReport::new();

        progress.on_archive_start(archive);

        while let Some(entry) = read_header(&mut reader)? {
            debug!(
                "{}: {} {} (mode {:#o}, {} bytes)",
                archive.display(),
                entry.entry_type,
                entry.path.display(),
                entry.mode,
                entry.size
            );
            progress.on_entry_start(&entry);

            let output = self.dispatch(&entry, &mut report, progress);
            stream_payload(&mut reader, &entry, output, &mut report, progress)?;

            progress.on_entry_complete(&entry);
        }

        report.records_read = reader.records_read();
        report.duration = start.elapsed();
        progress.on_archive_end(archive);

        Ok(report)
    }

    /// Creates the filesystem target for an entry, if it gets one.
    fn dispatch(
        &self,
        entry: &Entry,
        report: &mut ExtractionReport,
        progress: &mut dyn ProgressCallback,
    ) -> Option<OutputFile> {
        let path = self.dest.join(&entry.path);

        match entry.entry_type {
            EntryType::Directory => {
                let mode = self.config.dir_mode(entry.mode);
                match create_directory(&path, mode, self.config.default_dir_mode) {
                    Ok(()) => report.directories_created += 1,
                    Err(e) => entry_failed(e, report, progress),
                }
                None
            }
            EntryType::File => {
                let mode = self.config.file_mode(entry.mode);
                match create_file(&path, mode, self.config.default_dir_mode) {
                    Ok(file) => Some(OutputFile::new(path, file)),
                    Err(e) => {
                        entry_failed(e, report, progress);
                        None
                    }
                }
            }
            kind => {
                let message = format!("Ignoring {kind} {}", entry.path.display());
                warn!("{message}");
                progress.on_warning(&message);
                report.entries_skipped += 1;
                report.add_warning(message);
                None
            }
        }
    }
}

/// Reads the next header; `None` at the end-of-archive marker.
fn read_header<R: Read>(reader: &mut RecordReader<R>) -> Result<Option<Entry>> {
    let block = reader.read_record()?;
    if is_end_of_archive(&block) {
        debug!(
            "{}: end of archive after {} records",
            reader.archive().display(),
            reader.records_read()
        );
        return Ok(None);
    }

    let header = HeaderBlock::new(block);
    if !header.verify_checksum() {
        return Err(ExtractionError::ChecksumMismatch {
            archive: reader.archive().to_path_buf(),
            record: reader.records_read() - 1,
            stored: header.stored_checksum(),
            computed: header.computed_checksum(),
        });
    }

    Ok(Some(header.entry()))
}

/// Consumes the entry's payload records, writing them to `output` if set.
///
/// Exactly `payload_records()` records are read whether or not there is
/// anything to write them to. Bytes are counted only once written to the
/// file; the first failed write drops the handle.
fn stream_payload<R: Read>(
    reader: &mut RecordReader<R>,
    entry: &Entry,
    mut output: Option<OutputFile>,
    report: &mut ExtractionReport,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let mut remaining = entry.payload_len();

    for _ in 0..entry.payload_records() {
        let record = reader.read_record()?;
        let chunk = usize::try_from(remaining).map_or(BLOCK_SIZE, |r| r.min(BLOCK_SIZE));

        if let Some(mut out) = output.take() {
            match out.write_all(&record[..chunk]) {
                Ok(()) => {
                    report.bytes_written += chunk as u64;
                    progress.on_bytes_written(chunk as u64);
                    output = Some(out);
                }
                Err(e) => entry_failed(e, report, progress),
            }
        }

        remaining -= chunk as u64;
    }

    if let Some(out) = output {
        match out.finish() {
            Ok(()) => report.files_extracted += 1,
            Err(e) => entry_failed(e, report, progress),
        }
    }

    Ok(())
}

fn entry_failed(
    error: ExtractionError,
    report: &mut ExtractionReport,
    progress: &mut dyn ProgressCallback,
) {
    warn!("{error}");
    progress.on_entry_error(&error);
    report.entries_failed += 1;
    report.add_warning(error.to_string());
}

/// An open output file, closed when dropped.
struct OutputFile {
    path: PathBuf,
    file: File,
}

impl OutputFile {
    const fn new(path: PathBuf, file: File) -> Self {
        Self { path, file }
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.file
            .write_all(buf)
            .map_err(|source| ExtractionError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn finish(mut self) -> Result<()> {
        self.file.flush().map_err(|source| ExtractionError::Write {
            path: self.path,
            source,
        })
    }
}
