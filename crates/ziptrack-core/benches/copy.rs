//! Benchmarks for the progress-reporting stream copier.
//!
//! Measures copy throughput at several chunk sizes, with and without
//! progress observers attached.

#![allow(clippy::unwrap_used)] // Allow unwrap in benchmarks for brevity

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use std::fs;
use std::hint::black_box;
use std::io::Cursor;
use tempfile::TempDir;
use ziptrack_core::BuildOptions;
use ziptrack_core::ProgressSinks;
use ziptrack_core::Transfer;
use ziptrack_core::build_with_options;
use ziptrack_core::copy::CopyBuffer;
use ziptrack_core::copy::copy_with_progress;

const PAYLOAD: usize = 4 * 1024 * 1024;

fn benchmark_chunk_sizes(c: &mut Criterion) {
    let data = vec![0x5au8; PAYLOAD];
    let mut group = c.benchmark_group("copy_chunk_size");
    group.throughput(Throughput::Bytes(PAYLOAD as u64));

    for chunk in [512usize, 4096, 64 * 1024] {
        group.bench_with_input(BenchmarkId::new("no_sinks", chunk), &chunk, |b, &chunk| {
            let mut buffer = CopyBuffer::with_chunk_size(chunk);
            b.iter(|| {
                let mut transfer = Transfer::new(PAYLOAD as u64);
                let mut output = Vec::with_capacity(PAYLOAD);
                black_box(
                    copy_with_progress(
                        &mut Cursor::new(&data),
                        &mut output,
                        PAYLOAD as u64,
                        &mut transfer,
                        &mut ProgressSinks::none(),
                        &mut buffer,
                    )
                    .unwrap(),
                );
            });
        });

        group.bench_with_input(BenchmarkId::new("both_sinks", chunk), &chunk, |b, &chunk| {
            let mut buffer = CopyBuffer::with_chunk_size(chunk);
            b.iter(|| {
                let mut on_item = |p: f64| {
                    black_box(p);
                };
                let mut on_total = |p: f64| {
                    black_box(p);
                };
                let mut sinks = ProgressSinks::new(Some(&mut on_item), Some(&mut on_total));
                let mut transfer = Transfer::new(PAYLOAD as u64);
                let mut output = Vec::with_capacity(PAYLOAD);
                black_box(
                    copy_with_progress(
                        &mut Cursor::new(&data),
                        &mut output,
                        PAYLOAD as u64,
                        &mut transfer,
                        &mut sinks,
                        &mut buffer,
                    )
                    .unwrap(),
                );
            });
        });
    }

    group.finish();
}

fn benchmark_build_archive(c: &mut Criterion) {
    let source = TempDir::new().unwrap();
    let files: Vec<_> = (0..100)
        .map(|i| {
            let path = source.path().join(format!("file_{i}.txt"));
            fs::write(&path, "x".repeat(1024)).unwrap();
            path
        })
        .collect();

    let options = BuildOptions::default();

    c.bench_function("build_100_files", |b| {
        b.iter(|| {
            let output = TempDir::new().unwrap();
            let archive = output.path().join("test.zip");
            black_box(
                build_with_options(&archive, &files, &options, &mut ProgressSinks::none())
                    .unwrap(),
            );
        });
    });
}

criterion_group!(benches, benchmark_chunk_sizes, benchmark_build_archive);
criterion_main!(benches);
