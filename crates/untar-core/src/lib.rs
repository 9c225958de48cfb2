//! Streaming extraction of ustar archives.
//!
//! `untar-core` reads a ustar archive as a forward-only sequence of 512-byte
//! records and materializes its regular files and directories on disk.
//! Links, device nodes and FIFOs are recognized, reported and skipped.
//! Compression and extended header formats are not supported.
//!
//! # Examples
//!
//! ```no_run
//! use untar_core::ExtractionConfig;
//! use untar_core::NoopProgress;
//! use untar_core::extract_archive;
//! use untar_core::types::DestDir;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dest = DestDir::new("/output/dir")?;
//! let report = extract_archive("archive.tar", &dest, &ExtractionConfig::default(), &mut NoopProgress)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod report;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

pub use api::extract_archive;
pub use api::extract_reader;
pub use config::ExtractionConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use extraction::Extractor;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

pub use types::DestDir;
pub use types::EntryType;
