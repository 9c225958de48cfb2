//! Property-based tests for header decoding and stream alignment.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Cursor;
use std::path::Path;

use proptest::prelude::*;
use tempfile::TempDir;
use untar_core::ExtractionConfig;
use untar_core::NoopProgress;
use untar_core::extract_reader;
use untar_core::formats::BLOCK_SIZE;
use untar_core::formats::HeaderBlock;
use untar_core::formats::is_end_of_archive;
use untar_core::formats::parse_octal;
use untar_core::test_utils::UstarBuilder;
use untar_core::test_utils::ustar_header;
use untar_core::types::DestDir;

const CHECKSUM_START: usize = 148;
const CHECKSUM_END: usize = 156;

proptest! {
    /// Padding before and after the digit run never changes the value.
    #[test]
    fn prop_parse_octal_ignores_padding(
        value in 0u64..0o777_7777_7777,
        lead in prop::collection::vec(prop::sample::select(vec![b' ', 0u8, b'x', b'9']), 0..4),
        trail in prop::collection::vec(prop::sample::select(vec![b' ', 0u8, b'8', b'-']), 0..4),
    ) {
        let mut field = lead.clone();
        field.extend(format!("{value:o}").into_bytes());
        field.extend(&trail);
        prop_assert_eq!(parse_octal(&field), value);
    }

    /// Zero-padded fields of any width decode to their value.
    #[test]
    fn prop_parse_octal_zero_padded(value in 0u64..0o7777_7777, width in 8usize..12) {
        let field = format!("{value:0width$o}");
        prop_assert_eq!(parse_octal(field.as_bytes()), value);
    }

    /// Headers written with a correct checksum always validate.
    #[test]
    fn prop_valid_header_checksum(
        name in "[a-zA-Z0-9_./-]{1,100}",
        mode in 0u32..0o7777,
        size in 0u64..0o777_7777_7777,
        typeflag in prop::sample::select(vec![b'0', b'1', b'2', b'3', b'4', b'5', b'6', 0u8]),
    ) {
        let block = HeaderBlock::new(ustar_header(&name, mode, size, typeflag));
        prop_assert!(block.verify_checksum());
        prop_assert_eq!(block.stored_checksum(), block.computed_checksum());
        prop_assert_eq!(block.size(), size);
        prop_assert_eq!(block.mode(), mode);
    }

    /// Changing any byte outside the checksum field breaks validation.
    #[test]
    fn prop_corrupted_header_fails(
        offset in (0usize..BLOCK_SIZE).prop_filter("outside checksum field", |o| {
            !(CHECKSUM_START..CHECKSUM_END).contains(o)
        }),
        delta in 1u8..=255,
    ) {
        let mut bytes = ustar_header("file.txt", 0o644, 42, b'0');
        bytes[offset] = bytes[offset].wrapping_add(delta);
        prop_assert!(!HeaderBlock::new(bytes).verify_checksum());
    }

    /// A single nonzero byte anywhere means the record is not the end marker.
    #[test]
    fn prop_nonzero_block_is_not_end(offset in 0usize..BLOCK_SIZE, value in 1u8..=255) {
        let mut block = [0u8; BLOCK_SIZE];
        block[offset] = value;
        prop_assert!(!is_end_of_archive(&block));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Skipped entries drain exactly their padded payload, so the following
    /// header is always found.
    #[test]
    fn prop_skipped_payload_keeps_alignment(
        typeflag in prop::sample::select(vec![b'1', b'2', b'3', b'4', b'6']),
        len in 0usize..3000,
        content in prop::collection::vec(any::<u8>(), 0..600),
    ) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).expect("failed to create dest");

        let data = UstarBuilder::new()
            .add_entry("special", 0o644, typeflag, &vec![0xA5u8; len])
            .add_file("after.bin", &content)
            .finish();

        let report = extract_reader(
            Cursor::new(data),
            Path::new("prop.tar"),
            &dest,
            &ExtractionConfig::default(),
            &mut NoopProgress,
        ).expect("extraction should succeed");

        prop_assert_eq!(report.entries_skipped, 1);
        prop_assert_eq!(report.files_extracted, 1);
        let expected_records = 1 + len.div_ceil(BLOCK_SIZE) as u64 + 1 + content.len().div_ceil(BLOCK_SIZE) as u64 + 1;
        prop_assert_eq!(std::fs::read(temp.path().join("after.bin")).unwrap(), content);
        prop_assert_eq!(report.records_read, expected_records);
    }
}
