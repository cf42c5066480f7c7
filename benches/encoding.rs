//! Wire primitive benchmarks for pbcodec
//!
//! These benchmarks measure varint and zig-zag throughput and tag parsing,
//! which dominate the cost of both encoding and decoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box as hint_black_box;
use pbcodec::encoding::varint::{decode_varint, encode_varint, zigzag_decode, zigzag_encode};
use pbcodec::encoding::wire::{Tag, WireReader, WireType};

fn varint_cases() -> Vec<(u64, &'static str)> {
    vec![
        (0, "zero"),
        (127, "1_byte_max"),
        (16383, "2_byte_max"),
        (2097151, "3_byte_max"),
        (268435455, "4_byte_max"),
        (i64::MAX as u64, "max_i64"),
        (u64::MAX, "max_u64"),
    ]
}

fn bench_varint_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint_encode");

    for (value, name) in varint_cases() {
        group.bench_with_input(BenchmarkId::new("encode", name), &value, |b, &value| {
            let mut buf = [0u8; 10];
            b.iter(|| {
                let len = encode_varint(black_box(value), &mut buf);
                hint_black_box(len)
            });
        });
    }

    group.finish();
}

fn bench_varint_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint_decode");

    for (value, name) in varint_cases() {
        let mut buf = [0u8; 10];
        let len = encode_varint(value, &mut buf);

        group.bench_with_input(BenchmarkId::new("decode", name), &buf[..len], |b, data| {
            b.iter(|| {
                let result = decode_varint(black_box(data));
                hint_black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_zigzag(c: &mut Criterion) {
    let mut group = c.benchmark_group("zigzag");

    group.bench_function("encode_decode", |b| {
        b.iter(|| {
            let mapped = zigzag_encode(black_box(-1_000_000));
            hint_black_box(zigzag_decode(mapped))
        });
    });

    group.finish();
}

fn bench_tag_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("tag_stream");

    let mut buf = Vec::new();
    for number in 1..=256u32 {
        Tag::new(number, WireType::Varint).write(&mut buf);
        buf.push(0x01);
    }

    group.bench_function("read_and_skip_256", |b| {
        b.iter(|| {
            let mut reader = WireReader::new(black_box(&buf));
            let mut count = 0;
            while !reader.is_empty() {
                let tag = reader.read_tag().unwrap();
                reader.skip(tag.wire_type).unwrap();
                count += 1;
            }
            hint_black_box(count)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_varint_encode,
    bench_varint_decode,
    bench_zigzag,
    bench_tag_stream
);
criterion_main!(benches);
