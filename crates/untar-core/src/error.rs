//! Error types for archive extraction operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur during archive extraction.
///
/// Errors fall into two scopes. Archive-fatal errors stop extraction of the
/// current archive and are returned to the caller. Entry-level errors are
/// reported through the progress callback, recorded in the report, and
/// extraction continues with the next entry.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The archive file could not be opened for reading.
    #[error("Unable to open {}: {source}", .path.display())]
    Open {
        /// Path of the archive.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The stream ended before a full 512-byte record was available.
    #[error("Short read on {}: expected {expected}, got {got}", .archive.display())]
    ShortRead {
        /// Label of the archive being read.
        archive: PathBuf,
        /// Bytes requested.
        expected: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// A header block failed checksum validation.
    #[error(
        "Checksum failure in {} at record {record}: stored {stored:#o}, computed {computed:#o}",
        .archive.display()
    )]
    ChecksumMismatch {
        /// Label of the archive being read.
        archive: PathBuf,
        /// Zero-based index of the offending record.
        record: u64,
        /// Checksum stored in the header.
        stored: u64,
        /// Checksum computed over the block.
        computed: u64,
    },

    /// A directory could not be created.
    #[error("Could not create directory {}: {source}", .path.display())]
    DirectoryCreate {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A regular file could not be created, even after creating its parent.
    #[error("Could not create file {}: {source}", .path.display())]
    FileCreate {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing payload bytes to an output file failed.
    #[error("Failed write to {}: {source}", .path.display())]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O operation on the archive stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    /// Returns `true` if this error stops extraction of the current archive.
    ///
    /// Entry-level failures (directory or file creation, payload writes) are
    /// not fatal: the entry's payload is still drained so the stream stays
    /// aligned, and extraction continues with the next header.
    ///
    /// # Examples
    ///
    /// ```
    /// use untar_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::ShortRead {
    ///     archive: PathBuf::from("a.tar"),
    ///     expected: 512,
    ///     got: 17,
    /// };
    /// assert!(err.is_archive_fatal());
    ///
    /// let err = ExtractionError::Write {
    ///     path: PathBuf::from("out.txt"),
    ///     source: std::io::Error::other("disk full"),
    /// };
    /// assert!(!err.is_archive_fatal());
    /// ```
    #[must_use]
    pub const fn is_archive_fatal(&self) -> bool {
        matches!(
            self,
            Self::Open { .. } | Self::ShortRead { .. } | Self::ChecksumMismatch { .. } | Self::Io(_)
        )
    }

    /// Returns the filesystem path an entry-level error refers to.
    #[must_use]
    pub fn entry_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::DirectoryCreate { path, .. }
            | Self::FileCreate { path, .. }
            | Self::Write { path, .. } => Some(path),
            _ => None,
        }
    }
}
