//! Benchmarks for hex decoding and image assembly.

extern crate minibyte;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use minibyte::{hex::ByteCode, write::assemble};
use std::hint::black_box;

fn listing(len: usize) -> String {
    (0..len).map(|i| format!("{:02X} ", i % 256)).collect()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for len in [16usize, 4096, 1 << 20] {
        let text = listing(len);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{len}_bytes"), |b| {
            b.iter(|| ByteCode::decode(black_box(text.as_bytes())).unwrap());
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    for len in [16usize, 4096, 1 << 20] {
        let code = ByteCode::from(vec![0x90; len]);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(format!("{len}_bytes"), |b| {
            b.iter(|| assemble(black_box(&code)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_assemble);
criterion_main!(benches);
