// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//!
//! Benchmark: registry lookups and cascading registration
//!
//! IDs and name lookups are linear scans over the `All` set. These benches
//! track how that scales as custom descriptors are added.

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dtype::{Dtype, Kind, Registry, SliceReader, TypeClass};

/// Registry with `extra` custom floats on top of the built-ins.
fn registry_with(extra: usize) -> (Registry, Dtype) {
    let registry = Registry::new();
    let mut last = Dtype::UnsafePointer;
    for i in 0..extra {
        let name: &'static str = Box::leak(format!("custom{}", i).into_boxed_str());
        last = Dtype::custom(name, 4, Kind::Float);
        registry.register_float(last);
    }
    (registry, last)
}

fn bench_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_id");
    for extra in [0usize, 16, 64] {
        let (registry, last) = registry_with(extra);
        group.bench_with_input(BenchmarkId::new("last", extra), &last, |b, d| {
            b.iter(|| black_box(registry.id(black_box(d))));
        });
        group.bench_with_input(BenchmarkId::new("find_by_name", extra), &last, |b, d| {
            b.iter(|| black_box(registry.find_by_name(black_box(d.name())).is_ok()));
        });
    }
    group.finish();
}

fn bench_type_class_check(c: &mut Criterion) {
    let registry = Registry::new();
    c.bench_function("type_class_check_hit", |b| {
        b.iter(|| black_box(registry.type_class_check(black_box(&Dtype::Float64), TypeClass::Ord)));
    });
    c.bench_function("type_class_check_miss", |b| {
        b.iter(|| {
            black_box(
                registry
                    .type_class_check(black_box(&Dtype::Complex128), TypeClass::Ord)
                    .is_err(),
            )
        });
    });
}

fn bench_register_float_idempotent(c: &mut Criterion) {
    let registry = Registry::new();
    let f16 = Dtype::custom("float16", 2, Kind::Float);
    registry.register_float(f16);
    c.bench_function("register_float_existing", |b| {
        b.iter(|| registry.register_float(black_box(f16)));
    });
}

fn bench_numpy_codec(c: &mut Criterion) {
    let registry = Registry::new();
    c.bench_function("numpy_encode_decode", |b| {
        b.iter(|| {
            let code = registry.numpy_dtype(black_box(&Dtype::Int64));
            black_box(code.and_then(|c| registry.from_numpy_dtype(&c)).is_ok())
        });
    });
}

fn bench_read_into_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_into_slice");
    for n in [64usize, 4096] {
        let bytes: Vec<u8> = (0..n as i64).flat_map(i64::to_le_bytes).collect();
        group.bench_with_input(BenchmarkId::new("int", n), &bytes, |b, bytes| {
            let mut slice = Dtype::Int.slice_of(n);
            b.iter(|| {
                let mut reader = SliceReader::new(bytes);
                Dtype::Int.read_into_slice(&mut slice, &mut reader).is_ok()
            });
        });
    }
    group.finish();
}

criterion_group!(
    registry_benches,
    bench_id,
    bench_type_class_check,
    bench_register_float_idempotent
);
criterion_group!(codec_benches, bench_numpy_codec, bench_read_into_slice);
criterion_main!(registry_benches, codec_benches);
