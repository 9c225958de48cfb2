//! Fixed-offset ustar header decoding and checksum verification.
//!
//! A header is a single 512-byte record. Only the fields needed for
//! extraction are decoded:
//!
//! | Field    | Offset | Length | Encoding         |
//! |----------|--------|--------|------------------|
//! | name     | 0      | 100    | NUL-padded text  |
//! | mode     | 100    | 8      | ASCII octal      |
//! | size     | 124    | 12     | ASCII octal      |
//! | checksum | 148    | 8      | ASCII octal      |
//! | typeflag | 156    | 1      | single character |
//!
//! Nothing in this module performs I/O.

use std::ops::Range;
use std::path::PathBuf;

use crate::types::EntryType;

/// Size of every record in the archive stream, headers and payload alike.
pub const BLOCK_SIZE: usize = 512;

const NAME: Range<usize> = 0..100;
const MODE: Range<usize> = 100..108;
const SIZE: Range<usize> = 124..136;
const CHECKSUM: Range<usize> = 148..156;
const TYPEFLAG: usize = 156;

/// Permission bits kept from the mode field.
const MODE_MASK: u64 = 0o7777;

#[inline]
const fn is_octal_digit(byte: u8) -> bool {
    matches!(byte, b'0'..=b'7')
}

/// Parses an ASCII octal field, ignoring leading and trailing non-digits.
///
/// Leading bytes that are not octal digits (spaces, NULs, anything else) are
/// skipped; digits are then accumulated until the first non-digit or the end
/// of the field. There is no sign handling.
///
/// The accumulator is 64 bits wide and wraps on overflow. The 8- and 12-byte
/// ustar fields hold at most 36 bits, so wrapping only happens when this is
/// called on slices longer than any header field.
///
/// # Examples
///
/// ```
/// use untar_core::formats::parse_octal;
///
/// assert_eq!(parse_octal(b"00000000005\0"), 5);
/// assert_eq!(parse_octal(b"  0644 \0"), 0o644);
/// assert_eq!(parse_octal(b"\0\0\0\0"), 0);
/// ```
#[must_use]
pub fn parse_octal(field: &[u8]) -> u64 {
    field
        .iter()
        .copied()
        .skip_while(|&b| !is_octal_digit(b))
        .take_while(|&b| is_octal_digit(b))
        .fold(0u64, |acc, b| {
            acc.wrapping_mul(8).wrapping_add(u64::from(b - b'0'))
        })
}

/// Sums all bytes of a header block as unsigned values, counting each of the
/// eight checksum-field bytes as an ASCII space.
#[must_use]
pub fn compute_checksum(block: &[u8; BLOCK_SIZE]) -> u64 {
    block
        .iter()
        .enumerate()
        .map(|(offset, &byte)| {
            if CHECKSUM.contains(&offset) {
                u64::from(b' ')
            } else {
                u64::from(byte)
            }
        })
        .sum()
}

/// Returns `true` if the stored checksum equals the computed one.
#[must_use]
pub fn verify_checksum(block: &[u8; BLOCK_SIZE]) -> bool {
    compute_checksum(block) == parse_octal(&block[CHECKSUM])
}

/// A raw 512-byte header record.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderBlock([u8; BLOCK_SIZE]);

impl HeaderBlock {
    /// Wraps a record read from the archive stream.
    #[must_use]
    pub const fn new(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the name field up to its first NUL byte.
    #[must_use]
    pub fn name_bytes(&self) -> &[u8] {
        let field = &self.0[NAME];
        let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        &field[..len]
    }

    /// Returns the entry name as a filesystem path, byte for byte on Unix.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        bytes_to_path(self.name_bytes())
    }

    /// Returns the permission bits of the mode field.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn mode(&self) -> u32 {
        (parse_octal(&self.0[MODE]) & MODE_MASK) as u32
    }

    /// Returns the declared payload size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        parse_octal(&self.0[SIZE])
    }

    /// Returns the raw typeflag byte.
    #[must_use]
    pub const fn typeflag(&self) -> u8 {
        self.0[TYPEFLAG]
    }

    /// Returns the checksum recorded in the header.
    #[must_use]
    pub fn stored_checksum(&self) -> u64 {
        parse_octal(&self.0[CHECKSUM])
    }

    /// Returns the checksum computed over this block.
    #[must_use]
    pub fn computed_checksum(&self) -> u64 {
        compute_checksum(&self.0)
    }

    /// Returns `true` if the header passes checksum validation.
    #[must_use]
    pub fn verify_checksum(&self) -> bool {
        verify_checksum(&self.0)
    }

    /// Decodes the fields the extraction driver dispatches on.
    ///
    /// Callers validate the checksum first; this does not.
    #[must_use]
    pub fn entry(&self) -> Entry {
        Entry {
            path: self.path(),
            mode: self.mode(),
            size: self.size(),
            entry_type: EntryType::from_typeflag(self.typeflag()),
        }
    }
}

impl std::fmt::Debug for HeaderBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderBlock")
            .field("name", &String::from_utf8_lossy(self.name_bytes()))
            .field("mode", &format_args!("{:#o}", self.mode()))
            .field("size", &self.size())
            .field("typeflag", &char::from(self.typeflag()))
            .finish()
    }
}

/// One archive member, decoded from a validated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Target path, used as-is relative to the output directory.
    pub path: PathBuf,
    /// Permission bits.
    pub mode: u32,
    /// Declared payload size from the header.
    pub size: u64,
    /// Kind of entry.
    pub entry_type: EntryType,
}

impl Entry {
    /// Number of meaningful payload bytes that follow the header.
    ///
    /// Directories never carry a payload, whatever their size field says.
    /// Every other type, including the unsupported special files, drains its
    /// declared size so the stream stays aligned.
    #[must_use]
    pub const fn payload_len(&self) -> u64 {
        if self.entry_type.is_directory() {
            0
        } else {
            self.size
        }
    }

    /// Number of records occupied by the payload.
    #[must_use]
    pub const fn payload_records(&self) -> u64 {
        self.payload_len().div_ceil(BLOCK_SIZE as u64)
    }
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ustar_header;

    #[test]
    fn test_parse_octal_plain() {
        assert_eq!(parse_octal(b"0000644"), 0o644);
        assert_eq!(parse_octal(b"00000000005"), 5);
        assert_eq!(parse_octal(b"777"), 0o777);
    }

    #[test]
    fn test_parse_octal_ignores_padding() {
        assert_eq!(parse_octal(b"   644 \0"), 0o644);
        assert_eq!(parse_octal(b"\0\0 12\0 "), 0o12);
        assert_eq!(parse_octal(b"xx17yy"), 0o17);
    }

    #[test]
    fn test_parse_octal_stops_at_first_non_digit() {
        assert_eq!(parse_octal(b"12 34"), 0o12);
        assert_eq!(parse_octal(b"1238"), 0o123);
    }

    #[test]
    fn test_parse_octal_empty_and_blank() {
        assert_eq!(parse_octal(b""), 0);
        assert_eq!(parse_octal(b"        "), 0);
        assert_eq!(parse_octal(&[0u8; 12]), 0);
    }

    #[test]
    fn test_parse_octal_largest_size_field() {
        assert_eq!(parse_octal(b"77777777777\0"), 0o777_7777_7777);
    }

    #[test]
    fn test_header_fields() {
        let block = HeaderBlock::new(ustar_header("hello.txt", 0o644, 5, b'0'));
        assert_eq!(block.name_bytes(), b"hello.txt");
        assert_eq!(block.path(), PathBuf::from("hello.txt"));
        assert_eq!(block.mode(), 0o644);
        assert_eq!(block.size(), 5);
        assert_eq!(block.typeflag(), b'0');
        assert!(block.verify_checksum());
    }

    #[test]
    fn test_name_fills_whole_field() {
        let name = "n".repeat(100);
        let block = HeaderBlock::new(ustar_header(&name, 0o644, 0, b'0'));
        assert_eq!(block.name_bytes().len(), 100);
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let mut bytes = ustar_header("file", 0o644, 10, b'0');
        bytes[10] ^= 0x01;
        let block = HeaderBlock::new(bytes);
        assert!(!block.verify_checksum());
        assert_ne!(block.stored_checksum(), block.computed_checksum());
    }

    #[test]
    fn test_checksum_field_counts_as_spaces() {
        let mut bytes = ustar_header("file", 0o644, 10, b'0');
        let stored = HeaderBlock::new(bytes).stored_checksum();
        // Rewriting the checksum field must not change the computed sum.
        bytes[CHECKSUM].copy_from_slice(b"\0\0\0\0\0\0\0\0");
        assert_eq!(compute_checksum(&bytes), stored);
    }

    #[test]
    fn test_all_zero_block_fails_checksum() {
        // 8 * 0x20 = 256, stored value parses as 0
        assert!(!verify_checksum(&[0u8; BLOCK_SIZE]));
    }

    #[test]
    fn test_mode_keeps_permission_bits_only() {
        let block = HeaderBlock::new(ustar_header("f", 0o104_755, 0, b'0'));
        assert_eq!(block.mode(), 0o4755);
    }

    #[test]
    fn test_directory_payload_is_zero() {
        let block = HeaderBlock::new(ustar_header("a/b/", 0o755, 4096, b'5'));
        let entry = block.entry();
        assert_eq!(entry.entry_type, EntryType::Directory);
        assert_eq!(entry.size, 4096);
        assert_eq!(entry.payload_len(), 0);
        assert_eq!(entry.payload_records(), 0);
    }

    #[test]
    fn test_symlink_payload_is_declared_size() {
        let block = HeaderBlock::new(ustar_header("link", 0o777, 513, b'2'));
        let entry = block.entry();
        assert_eq!(entry.entry_type, EntryType::Symlink);
        assert_eq!(entry.payload_len(), 513);
        assert_eq!(entry.payload_records(), 2);
    }

    #[test]
    fn test_debug_format_shows_decoded_fields() {
        let block = HeaderBlock::new(ustar_header("dbg.txt", 0o600, 1, b'0'));
        let debug = format!("{block:?}");
        assert!(debug.contains("dbg.txt"));
        assert!(debug.contains("0o600"));
    }
}
