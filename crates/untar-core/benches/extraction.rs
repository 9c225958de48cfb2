//! Benchmarks for untar-core header decoding and extraction.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use std::hint::black_box;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;
use untar_core::ExtractionConfig;
use untar_core::NoopProgress;
use untar_core::extract_reader;
use untar_core::formats::HeaderBlock;
use untar_core::test_utils::UstarBuilder;
use untar_core::test_utils::ustar_header;
use untar_core::types::DestDir;

/// Creates an archive with many small files.
fn many_small_files(file_count: usize) -> Vec<u8> {
    (0..file_count)
        .fold(UstarBuilder::new(), |builder, i| {
            builder.add_file(&format!("file{i:04}.txt"), format!("content{i}").as_bytes())
        })
        .finish()
}

/// Creates an archive with a single large file.
fn large_file(size_bytes: usize) -> Vec<u8> {
    UstarBuilder::new()
        .add_file("large_file.bin", &vec![0xAB_u8; size_bytes])
        .finish()
}

fn bench_header(c: &mut Criterion) {
    let block = HeaderBlock::new(ustar_header("some/dir/file.txt", 0o644, 123_456, b'0'));

    c.bench_function("header_verify_and_decode", |b| {
        b.iter(|| {
            let block = black_box(&block);
            assert!(block.verify_checksum());
            black_box(block.entry())
        });
    });
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for count in [10, 100, 1000] {
        let data = many_small_files(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("small_files", count), &data, |b, data| {
            b.iter(|| {
                let temp = TempDir::new().unwrap();
                let dest = DestDir::new(temp.path()).unwrap();
                extract_reader(
                    Cursor::new(data.as_slice()),
                    Path::new("bench.tar"),
                    &dest,
                    &ExtractionConfig::default(),
                    &mut NoopProgress,
                )
                .unwrap()
            });
        });
    }

    for size in [1024 * 1024, 16 * 1024 * 1024] {
        let data = large_file(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("large_file", size), &data, |b, data| {
            b.iter(|| {
                let temp = TempDir::new().unwrap();
                let dest = DestDir::new(temp.path()).unwrap();
                extract_reader(
                    Cursor::new(data.as_slice()),
                    Path::new("bench.tar"),
                    &dest,
                    &ExtractionConfig::default(),
                    &mut NoopProgress,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_header, bench_extract);
criterion_main!(benches);
