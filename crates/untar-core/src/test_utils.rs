//! Helpers for building raw ustar archives in memory.
//!
//! The builder writes headers byte by byte so tests control every field,
//! including deliberately inconsistent ones (directory entries with a
//! nonzero size, special files carrying data, corrupted checksums).
//!
//! # Panics
//!
//! Functions in this module panic on names or values that do not fit their
//! header field. They are meant for tests only.

#![allow(clippy::missing_panics_doc)]

use crate::formats::BLOCK_SIZE;

/// Builds a ustar header block with a correct checksum.
///
/// `mode` is written as seven octal digits, `size` as eleven, both NUL
/// terminated, matching what POSIX tar writers produce.
///
/// # Examples
///
/// ```
/// use untar_core::test_utils::ustar_header;
/// use untar_core::formats::HeaderBlock;
///
/// let block = HeaderBlock::new(ustar_header("hello.txt", 0o644, 5, b'0'));
/// assert!(block.verify_checksum());
/// assert_eq!(block.size(), 5);
/// ```
#[must_use]
pub fn ustar_header(name: &str, mode: u32, size: u64, typeflag: u8) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    assert!(name.len() <= 100, "name does not fit the 100-byte field");

    block[..name.len()].copy_from_slice(name.as_bytes());
    write_octal(&mut block[100..108], u64::from(mode));
    write_octal(&mut block[108..116], 0);
    write_octal(&mut block[116..124], 0);
    write_octal(&mut block[124..136], size);
    write_octal(&mut block[136..148], 0);
    block[156] = typeflag;
    block[257..263].copy_from_slice(b"ustar\0");
    block[263..265].copy_from_slice(b"00");

    block[148..156].fill(b' ');
    let sum: u64 = block.iter().map(|&b| u64::from(b)).sum();
    let checksum = format!("{sum:06o}\0 ");
    block[148..156].copy_from_slice(checksum.as_bytes());

    block
}

/// Writes `value` as zero-padded octal followed by a NUL.
fn write_octal(field: &mut [u8], value: u64) {
    let digits = field.len() - 1;
    let text = format!("{value:0digits$o}");
    assert!(text.len() == digits, "{value:#o} does not fit a {digits}-digit field");
    field[..digits].copy_from_slice(text.as_bytes());
    field[digits] = 0;
}

/// Builder for in-memory ustar archives.
///
/// # Examples
///
/// ```
/// use untar_core::test_utils::UstarBuilder;
///
/// let archive = UstarBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_symlink("link", b"")
///     .finish();
/// assert_eq!(archive.len() % 512, 0);
/// ```
#[derive(Debug, Default)]
pub struct UstarBuilder {
    data: Vec<u8>,
}

impl UstarBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_entry(name, 0o644, b'0', data)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(self, name: &str, data: &[u8], mode: u32) -> Self {
        self.add_entry(name, mode, b'0', data)
    }

    /// Adds a directory with mode 0o755 and no payload.
    #[must_use]
    pub fn add_directory(self, name: &str) -> Self {
        self.add_entry(name, 0o755, b'5', &[])
    }

    /// Adds a symlink entry whose payload is `data`.
    #[must_use]
    pub fn add_symlink(self, name: &str, data: &[u8]) -> Self {
        self.add_entry(name, 0o777, b'2', data)
    }

    /// Adds an entry of any type; the size field is `data.len()`.
    #[must_use]
    pub fn add_entry(mut self, name: &str, mode: u32, typeflag: u8, data: &[u8]) -> Self {
        self.data
            .extend_from_slice(&ustar_header(name, mode, data.len() as u64, typeflag));
        self.add_payload(data)
    }

    /// Appends a header whose size field is not followed by payload records.
    #[must_use]
    pub fn add_header(mut self, name: &str, mode: u32, size: u64, typeflag: u8) -> Self {
        self.data
            .extend_from_slice(&ustar_header(name, mode, size, typeflag));
        self
    }

    /// Appends `data` zero-padded to a whole number of records.
    #[must_use]
    pub fn add_payload(mut self, data: &[u8]) -> Self {
        self.data.extend_from_slice(data);
        let padding = (BLOCK_SIZE - data.len() % BLOCK_SIZE) % BLOCK_SIZE;
        self.data.resize(self.data.len() + padding, 0);
        self
    }

    /// Appends raw bytes without padding.
    #[must_use]
    pub fn add_raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Returns the archive without an end-of-archive marker.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.data
    }

    /// Returns the archive terminated by two all-zero records.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.data.resize(self.data.len() + 2 * BLOCK_SIZE, 0);
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::HeaderBlock;

    #[test]
    fn test_header_field_encoding() {
        let block = ustar_header("hello.txt", 0o644, 5, b'0');
        assert_eq!(&block[100..108], b"0000644\0");
        assert_eq!(&block[124..136], b"00000000005\0");
        assert_eq!(block[156], b'0');
        assert!(HeaderBlock::new(block).verify_checksum());
    }

    #[test]
    fn test_builder_pads_payload() {
        let archive = UstarBuilder::new().add_file("a", b"12345").build();
        assert_eq!(archive.len(), 2 * BLOCK_SIZE);
        assert_eq!(&archive[BLOCK_SIZE..BLOCK_SIZE + 5], b"12345");
        assert!(archive[BLOCK_SIZE + 5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_builder_exact_record_payload_has_no_padding() {
        let archive = UstarBuilder::new().add_file("a", &[1u8; 512]).build();
        assert_eq!(archive.len(), 2 * BLOCK_SIZE);
    }

    #[test]
    fn test_finish_appends_trailer() {
        let archive = UstarBuilder::new().finish();
        assert_eq!(archive, vec![0u8; 2 * BLOCK_SIZE]);
    }
}
