//! Error conversion utilities for CLI.
//!
//! Converts untar-core's typed errors (thiserror) into user-facing
//! contextual errors (anyhow).

use anyhow::anyhow;
use std::path::Path;
use untar_core::ExtractionError;

/// Converts `ExtractionError` to a user-facing anyhow error.
///
/// The first line always keeps the core error's message; hints follow on
/// separate lines.
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::ChecksumMismatch { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: '{}' is corrupted or not an uncompressed ustar archive.",
                archive.display()
            )
        }
        ExtractionError::ShortRead { got: 0, .. } => {
            anyhow!(
                "{err}\n\
                 HINT: the archive ends without an end-of-archive marker; it may be truncated."
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while reading '{}': {}",
                archive.display(),
                io_err
            )
        }
        other => anyhow::Error::from(other),
    }
}

/// Converts the error of an extraction result, keeping the report.
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
