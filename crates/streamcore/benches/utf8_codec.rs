//! Benchmark – UTF-8 decoding and encoding
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use streamcore::utf8;

/// Deterministic text of exactly `len` bytes mixing one- to four-byte
/// sequences in the proportions given by `sample`.
fn make_text(sample: &str, len: usize) -> Vec<u8> {
    let mut text = String::with_capacity(len + 4);
    for ch in sample.chars().cycle() {
        if text.len() + ch.len_utf8() > len {
            break;
        }
        text.push(ch);
    }
    // Pad with ASCII so every scenario decodes the same number of bytes.
    text.extend(std::iter::repeat_n('.', len - text.len()));
    text.into_bytes()
}

fn bench_decode(c: &mut Criterion) {
    let samples = [
        ("ascii", "The quick brown fox jumps over the lazy dog. "),
        ("latin", "Zażółć gęślą jaźń, Füße über Straßen. "),
        ("cjk", "東京都の天気は晴れです。"),
        ("emoji", "🐢🦀🎉 ok "),
    ];

    let mut group = c.benchmark_group("utf8_decode");
    for &(name, sample) in &samples {
        let bytes = make_text(sample, 64 * 1024);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &bytes, |b, bytes| {
            let mut out = Vec::with_capacity(bytes.len());
            b.iter(|| {
                out.clear();
                let report =
                    utf8::decode_into(black_box(bytes), utf8::REPLACEMENT_CHARACTER, &mut out);
                black_box(report);
            });
        });
    }

    let mut corrupt = make_text(samples[1].1, 64 * 1024);
    for byte in corrupt.iter_mut().step_by(97) {
        *byte = 0xFF;
    }
    group.bench_with_input(BenchmarkId::from_parameter("corrupt"), &corrupt, |b, bytes| {
        b.iter(|| black_box(utf8::decode(black_box(bytes), utf8::REPLACEMENT_CHARACTER)));
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let (code_points, _) = utf8::decode(
        &make_text("Zażółć gęślą jaźń 東京 🦀 ", 64 * 1024),
        utf8::REPLACEMENT_CHARACTER,
    );

    let mut group = c.benchmark_group("utf8_encode");
    group.throughput(Throughput::Elements(code_points.len() as u64));
    group.bench_function("mixed", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            out.clear();
            utf8::encode_into(black_box(&code_points), &mut out);
            black_box(out.len());
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

criterion_group! { name = benches; config = criterion(); targets = bench_decode, bench_encode }
criterion_main!(benches);
