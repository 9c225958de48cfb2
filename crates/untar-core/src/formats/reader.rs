//! Record-level reading of an archive stream.

use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use super::header::BLOCK_SIZE;
use crate::ExtractionError;
use crate::Result;

/// Returns `true` if every byte of the record is zero.
///
/// A single all-zero record ends the archive. Well-formed archives carry two,
/// but only the first one is ever read.
#[must_use]
pub fn is_end_of_archive(block: &[u8; BLOCK_SIZE]) -> bool {
    block.iter().all(|&b| b == 0)
}

/// Pulls fixed 512-byte records from a forward-only stream.
///
/// The reader never seeks. Every record handed out is a fresh buffer, so no
/// bytes from an earlier record can leak into a later one.
#[derive(Debug)]
pub struct RecordReader<R> {
    inner: R,
    archive: PathBuf,
    records_read: u64,
}

impl<R: Read> RecordReader<R> {
    /// Creates a reader over `inner`; `archive` labels diagnostics.
    pub fn new(inner: R, archive: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            archive: archive.into(),
            records_read: 0,
        }
    }

    /// Reads exactly one record.
    ///
    /// Partial reads from the underlying stream are retried until the record
    /// is complete or the stream reports end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ShortRead`] if the stream ends before 512
    /// bytes were read, or [`ExtractionError::Io`] if reading fails.
    pub fn read_record(&mut self) -> Result<[u8; BLOCK_SIZE]> {
        let mut block = [0u8; BLOCK_SIZE];
        let mut filled = 0;

        while filled < BLOCK_SIZE {
            match self.inner.read(&mut block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        if filled < BLOCK_SIZE {
            return Err(ExtractionError::ShortRead {
                archive: self.archive.clone(),
                expected: BLOCK_SIZE,
                got: filled,
            });
        }

        self.records_read += 1;
        Ok(block)
    }

    /// Number of complete records consumed so far.
    #[must_use]
    pub const fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Label used in diagnostics.
    #[must_use]
    pub fn archive(&self) -> &Path {
        &self.archive
    }
}
