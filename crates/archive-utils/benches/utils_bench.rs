//! Benchmarks for the stateless helpers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use archive_utils::{bytes_to_human, encode_base64, is_base64, is_image};

fn bench_bytes_to_human(c: &mut Criterion) {
    c.bench_function("bytes_to_human_range", |b| {
        b.iter(|| {
            for shift in 0..64 {
                black_box(bytes_to_human(black_box(1u64 << shift)));
            }
        })
    });
}

fn bench_base64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Base64");

    // A page-sized blob, roughly what a rendered cover weighs
    let data: Vec<u8> = (0..512 * 1024).map(|i| (i % 251) as u8).collect();
    let encoded = encode_base64(&data);

    group.bench_function("encode_512k", |b| {
        b.iter(|| black_box(encode_base64(black_box(&data))))
    });

    group.bench_function("is_base64_512k", |b| {
        b.iter(|| black_box(is_base64(black_box(&encoded))))
    });

    group.finish();
}

fn bench_is_image(c: &mut Criterion) {
    let names = ["jpg", "PNG", "xml", "webp", "txt", "avif", "opf", "svg"];
    c.bench_function("is_image_mixed", |b| {
        b.iter(|| {
            for name in &names {
                black_box(is_image(Some(black_box(name))));
            }
        })
    });
}

criterion_group!(benches, bench_bytes_to_human, bench_base64, bench_is_image);
criterion_main!(benches);
