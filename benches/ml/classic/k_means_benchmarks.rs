use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lloyd::{kmeans, KMeansConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn generate_blobs(k: usize, per_blob: usize, dim: usize) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let noise = Normal::new(0.0, 1.0).unwrap();
    (0..k)
        .flat_map(|c| std::iter::repeat(c as f64 * 10.0).take(per_blob))
        .map(|center| (0..dim).map(|_| center + noise.sample(&mut rng)).collect())
        .collect()
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");
    for &n in &[1_000, 10_000] {
        let data = generate_blobs(8, n / 8, 16);
        let config = KMeansConfig::new(8).with_seed(7);

        group.bench_with_input(BenchmarkId::new("sequential", n), &data, |b, data| {
            b.iter(|| kmeans(black_box(data), &config).unwrap())
        });
        let parallel = config.clone().with_parallel(true);
        group.bench_with_input(BenchmarkId::new("parallel", n), &data, |b, data| {
            b.iter(|| kmeans(black_box(data), &parallel).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
