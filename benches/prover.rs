//! Benchmark the performance of untrusted witness generation with respect
//! to the number of accumulated elements.
use cksacc::{sha2::Sha256, Accumulator, Prover};
use criterion::{
    criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use k256::ProjectivePoint;
use rand::RngCore;

fn prover_prove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("prove");
    for size in [4usize, 8, 16, 32, 64] {
        let mut rng = rand::thread_rng();
        let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
            |buf| rng.fill_bytes(buf),
        );
        let mut prover = Prover::<ProjectivePoint, Sha256>::new();
        // Accumulate `size` random 8-byte elements.
        let mut elements = Vec::with_capacity(size);
        let mut bytes = vec![0u8; 8];
        for _ in 0..size {
            rng.fill_bytes(&mut bytes);
            elements.push(bytes.clone());
        }
        for element in elements.iter() {
            prover.update(acc.add(element)).unwrap();
        }
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &elements[0],
            |bencher, element| {
                bencher.iter(|| prover.prove(element).unwrap())
            },
        );
    }
    group.finish();
}

criterion_group!(benches, prover_prove);
criterion_main!(benches);
