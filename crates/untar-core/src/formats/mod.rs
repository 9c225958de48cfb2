//! ustar record layout: header decoding and record-level stream reading.

pub mod header;
pub mod reader;

pub use header::BLOCK_SIZE;
pub use header::Entry;
pub use header::HeaderBlock;
pub use header::parse_octal;
pub use reader::RecordReader;
pub use reader::is_end_of_archive;
