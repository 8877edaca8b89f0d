// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//!
//! Benchmark: Variant codec encode/decode throughput
//!
//! Measures flat arrays, string-heavy arrays and nested objects of growing
//! size, plus the equality/hash path that decoded trees go through.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dynvar::{codec, Variant};

// ============================================================================
// Fixtures
// ============================================================================

fn number_array(len: usize) -> Variant {
    Variant::array((0..len).map(|i| i32::try_from(i).unwrap_or(i32::MAX)).collect::<Vec<_>>())
}

fn string_array(len: usize) -> Variant {
    Variant::array((0..len).map(|i| format!("sensor-{i:06}")).collect::<Vec<_>>())
}

/// Object of `width` entries, each holding a small record object.
fn record_object(width: usize) -> Variant {
    let mut root = Variant::object();
    for i in 0..width {
        let id = i32::try_from(i).unwrap_or(i32::MAX);
        let slot = root.mem(format!("record-{i}")).unwrap();
        slot.assign(Variant::object()).unwrap();
        slot.mem("id").unwrap().assign(id).unwrap();
        slot.mem("active").unwrap().assign(i % 2 == 0).unwrap();
        slot.mem("tags").unwrap().assign(Variant::array(["a", "b", "c"])).unwrap();
    }
    root
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in [16usize, 256, 4096] {
        let fixtures = [
            ("numbers", number_array(size)),
            ("strings", string_array(size)),
            ("records", record_object(size / 16)),
        ];
        for (name, value) in &fixtures {
            let encoded_len = codec::encode(value).map(|b| b.len()).unwrap_or(0);
            group.throughput(Throughput::Bytes(encoded_len as u64));
            group.bench_with_input(BenchmarkId::new(*name, size), value, |b, value| {
                let mut buffer = Vec::with_capacity(encoded_len);
                b.iter(|| {
                    buffer.clear();
                    codec::encode_into(black_box(value), &mut buffer).unwrap();
                    black_box(buffer.len())
                })
            });
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in [16usize, 256, 4096] {
        let fixtures = [
            ("numbers", number_array(size)),
            ("strings", string_array(size)),
            ("records", record_object(size / 16)),
        ];
        for (name, value) in &fixtures {
            let bytes = codec::encode(value).unwrap();
            group.throughput(Throughput::Bytes(bytes.len() as u64));
            group.bench_with_input(BenchmarkId::new(*name, size), &bytes, |b, bytes| {
                b.iter(|| black_box(codec::decode(black_box(bytes)).unwrap()))
            });
        }
    }
    group.finish();
}

fn bench_equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("equality");
    let left = record_object(256);
    let right = left.clone();
    group.bench_function("records_eq_256", |b| {
        b.iter(|| black_box(black_box(&left) == black_box(&right)))
    });
    group.bench_function("records_hash_256", |b| {
        b.iter(|| black_box(black_box(&left).hash_code()))
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_equality);
criterion_main!(benches);
