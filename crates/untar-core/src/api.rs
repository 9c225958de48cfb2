//! High-level public API for archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::extraction::Extractor;
use crate::types::DestDir;

/// Extracts the ustar archive at `archive_path` into `dest`.
///
/// The file is opened for reading, streamed through the extraction driver
/// and closed before returning.
///
/// # Errors
///
/// Returns [`ExtractionError::Open`] if the archive cannot be opened, and
/// any archive-fatal error from [`Extractor::extract`].
///
/// # Examples
///
/// ```no_run
/// use untar_core::ExtractionConfig;
/// use untar_core::NoopProgress;
/// use untar_core::extract_archive;
/// use untar_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::current()?;
/// let report = extract_archive("archive.tar", &dest, &ExtractionConfig::default(), &mut NoopProgress)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>>(
    archive_path: P,
    dest: &DestDir,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let path = archive_path.as_ref();
    let file = File::open(path).map_err(|source| ExtractionError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    extract_reader(BufReader::new(file), path, dest, config, progress)
}

/// Extracts a ustar stream from any reader; `label` names it in diagnostics.
///
/// # Errors
///
/// Returns any archive-fatal error from [`Extractor::extract`].
pub fn extract_reader<R: Read>(
    reader: R,
    label: &Path,
    dest: &DestDir,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    Extractor::new(dest.clone(), config.clone()).extract(reader, label, progress)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use crate::test_utils::UstarBuilder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_archive_from_file() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let archive = input.path().join("one.tar");
        fs::write(
            &archive,
            UstarBuilder::new().add_file("one.txt", b"one").finish(),
        )
        .unwrap();

        let dest = DestDir::new(output.path()).unwrap();
        let report =
            extract_archive(&archive, &dest, &ExtractionConfig::default(), &mut NoopProgress)
                .unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(fs::read(output.path().join("one.txt")).unwrap(), b"one");
    }

    #[test]
    fn test_extract_archive_missing_file() {
        let output = TempDir::new().unwrap();
        let dest = DestDir::new(output.path()).unwrap();

        let err = extract_archive(
            output.path().join("missing.tar"),
            &dest,
            &ExtractionConfig::default(),
            &mut NoopProgress,
        )
        .unwrap_err();

        assert!(matches!(err, ExtractionError::Open { .. }));
        assert!(err.to_string().starts_with("Unable to open"));
    }

    #[test]
    fn test_extract_reader_label_in_errors() {
        let output = TempDir::new().unwrap();
        let dest = DestDir::new(output.path()).unwrap();

        let err = extract_reader(
            &[1u8; 10][..],
            Path::new("<stdin>"),
            &dest,
            &ExtractionConfig::default(),
            &mut NoopProgress,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Short read on <stdin>: expected 512, got 10"
        );
    }
}
