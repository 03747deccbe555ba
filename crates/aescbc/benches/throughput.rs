//! Benchmarks for the one-shot functions and the reusable handle.
//!
//! The one-shot path pays for validation and AES key expansion on every call;
//! the handle pays for them once. Both run over a 1 KiB payload.

use aescbc::CbcHandle;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const BENCH_KEY: &[u8] = b"imwl8sot7u8zvdcr6wvbwcmhrwpfb3rs";
const BENCH_IV: &[u8] = b"lgd73e8vc7ah52u9";

/// Payload size in bytes.
const PAYLOAD_LEN: usize = 1024;

fn payload() -> Vec<u8> {
    vec![b'A'; PAYLOAD_LEN]
}

fn bench_one_shot(c: &mut Criterion) {
    let data = payload();
    let encrypted = aescbc::encrypt(&data, BENCH_KEY, BENCH_IV).unwrap();

    let mut group = c.benchmark_group("one_shot");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    group.bench_function("encrypt", |b| {
        b.iter(|| aescbc::encrypt(black_box(&data), BENCH_KEY, BENCH_IV).unwrap());
    });
    group.bench_function("decrypt", |b| {
        b.iter(|| aescbc::decrypt(black_box(&encrypted), BENCH_KEY, BENCH_IV).unwrap());
    });

    group.finish();
}

fn bench_handle(c: &mut Criterion) {
    let data = payload();
    let handle = CbcHandle::new(BENCH_KEY, BENCH_IV).unwrap();
    let encrypted = handle.encrypt(&data).unwrap();

    let mut group = c.benchmark_group("handle");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    group.bench_function("encrypt", |b| {
        b.iter(|| handle.encrypt(black_box(&data)).unwrap());
    });
    group.bench_function("decrypt", |b| {
        b.iter(|| handle.decrypt(black_box(&encrypted)).unwrap());
    });

    group.finish();
}

/// Measures validation plus key schedule expansion alone.
fn bench_handle_new(c: &mut Criterion) {
    c.bench_function("handle_new", |b| {
        b.iter(|| CbcHandle::new(black_box(BENCH_KEY), black_box(BENCH_IV)).unwrap());
    });
}

criterion_group!(benches, bench_one_shot, bench_handle, bench_handle_new);
criterion_main!(benches);
