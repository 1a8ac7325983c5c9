//! Benchmark – `streamcore::Reader` over sources with different read sizes
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use streamcore::{BinaryReader, MemorySource, Reader, ReaderOptions, TextReader};

const PAYLOAD_LEN: usize = 1 << 20;

fn make_lines(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + 64);
    let mut index = 0usize;
    while out.len() < len {
        out.extend_from_slice(format!("line {index:08} key=value\n").as_bytes());
        index += 1;
    }
    out.truncate(len);
    out
}

/// Drains the reader byte by byte, counting newlines.
fn count_lines_by_byte(data: &[u8], capacity: usize, max_read: usize) -> usize {
    let mut source = MemorySource::from(data).with_max_read(max_read);
    let mut reader = Reader::with_options(
        &mut source,
        ReaderOptions {
            capacity,
            ..ReaderOptions::default()
        },
    );
    let mut lines = 0;
    while let Some(byte) = reader.get().unwrap() {
        lines += usize::from(byte == b'\n');
    }
    lines
}

fn bench_get(c: &mut Criterion) {
    let data = make_lines(PAYLOAD_LEN);
    let mut group = c.benchmark_group("reader_get");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for &capacity in &[64usize, 4096, 65_536] {
        for &max_read in &[512usize, usize::MAX] {
            let id = BenchmarkId::new(capacity.to_string(), format!("max_read={max_read}"));
            group.bench_with_input(id, &data, |b, data| {
                b.iter(|| black_box(count_lines_by_byte(black_box(data), capacity, max_read)));
            });
        }
    }
    group.finish();
}

fn bench_scans(c: &mut Criterion) {
    let data = make_lines(PAYLOAD_LEN);
    let mut group = c.benchmark_group("reader_scans");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("read_until", |b| {
        b.iter(|| {
            let mut source = MemorySource::from(data.as_slice());
            let mut reader = BinaryReader::new(&mut source);
            let mut total = 0;
            while !reader.is_eof() {
                total += reader.read_until(b'\n').unwrap().len();
            }
            black_box(total)
        });
    });

    group.bench_function("consume_line", |b| {
        b.iter(|| {
            let mut source = MemorySource::from(data.as_slice());
            let mut reader = TextReader::new(&mut source);
            let mut total = 0;
            while !reader.is_eof() {
                total += reader.consume_line().unwrap().len();
            }
            black_box(total)
        });
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_get, bench_scans }
criterion_main!(benches);
