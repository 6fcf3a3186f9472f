//! Hash engine and verifier benchmark.
//!
//! Run with: cargo bench -p merklepath-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use merklepath_core::{hash_pair, sha256, verify, Block, MemoryChannel};

fn random_data(size: usize) -> Vec<u8> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

fn bench_sha256(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha256");

    for size in [64usize, 1024, 64 * 1024] {
        let data = random_data(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| sha256(black_box(data)));
        });
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    for depth in [8usize, 32, 256] {
        let leaf: Block = [0x42; 32];
        let mut stream = leaf.to_vec();
        for step in 0..depth {
            stream.push((step % 2) as u8);
            stream.extend_from_slice(&sha256(&step.to_be_bytes()));
        }

        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &stream, |b, stream| {
            b.iter(|| {
                let mut channel = MemoryChannel::new(black_box(stream));
                verify(&mut channel).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_hash_pair(c: &mut Criterion) {
    let left: Block = [0x11; 32];
    let right: Block = [0x22; 32];

    c.bench_function("hash_pair", |b| {
        b.iter(|| hash_pair(black_box(&left), black_box(&right)));
    });
}

criterion_group!(benches, bench_sha256, bench_verify, bench_hash_pair);
criterion_main!(benches);
