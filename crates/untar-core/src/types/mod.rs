//! Core value types shared by the parser, materializer and driver.

pub mod dest_dir;
pub mod entry_type;

pub use dest_dir::DestDir;
pub use entry_type::EntryType;
