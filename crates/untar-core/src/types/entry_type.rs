//! Archive entry type enumeration.

use std::fmt;

/// Type of entry in an archive, derived from the header's typeflag byte.
///
/// Only regular files and directories are materialized. The remaining
/// variants are recognized so they can be reported and skipped; their
/// declared payload is still drained from the stream.
///
/// # Examples
///
/// ```
/// use untar_core::types::EntryType;
///
/// assert_eq!(EntryType::from_typeflag(b'5'), EntryType::Directory);
/// assert_eq!(EntryType::from_typeflag(b'0'), EntryType::File);
/// assert_eq!(EntryType::from_typeflag(0), EntryType::File);
/// assert!(!EntryType::from_typeflag(b'2').is_supported());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file (`'0'`, NUL, or any unrecognized flag).
    File,
    /// Hard link (`'1'`).
    Hardlink,
    /// Symbolic link (`'2'`).
    Symlink,
    /// Character device (`'3'`).
    CharDevice,
    /// Block device (`'4'`).
    BlockDevice,
    /// Directory (`'5'`).
    Directory,
    /// Named pipe (`'6'`).
    Fifo,
}

impl EntryType {
    /// Maps a typeflag byte to an entry type.
    ///
    /// Unknown flags fall back to [`EntryType::File`].
    #[must_use]
    pub const fn from_typeflag(flag: u8) -> Self {
        match flag {
            b'1' => Self::Hardlink,
            b'2' => Self::Symlink,
            b'3' => Self::CharDevice,
            b'4' => Self::BlockDevice,
            b'5' => Self::Directory,
            b'6' => Self::Fifo,
            _ => Self::File,
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` if entries of this type are written to the filesystem.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::File | Self::Directory)
    }

    /// Human-readable name used in progress and warning messages.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Hardlink => "hardlink",
            Self::Symlink => "symlink",
            Self::CharDevice => "character device",
            Self::BlockDevice => "block device",
            Self::Directory => "dir",
            Self::Fifo => "FIFO",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
