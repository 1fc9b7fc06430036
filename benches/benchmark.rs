// Performance benchmarks for the O(n^2) competitor ranking pass
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use peerprice::prelude::*;
use rand::prelude::*;

fn generate_random_listing(id: usize, rng: &mut impl Rng) -> Listing {
    let mut l = Listing::new(id as u64);
    l.latitude = Some(47.5 + rng.random_range(0.0..0.2));
    l.longitude = Some(-122.4 + rng.random_range(0.0..0.2));
    l.cluster_id = Some(rng.random_range(0..8));
    l.bedrooms = Some(rng.random_range(1..6));
    l.beds = Some(rng.random_range(1..8));
    l.baths = Some(rng.random_range(1..4) as f64);
    l.guests = Some(rng.random_range(2..12));
    l.rating = Some(rng.random_range(2.0..5.0));
    l.quality_tier = Some(QualityTier::classify(l.rating));
    l.amenities = (0..rng.random_range(3..15))
        .map(|a| format!("amenity-{}", a))
        .collect();
    l.price_per_night = Some(rng.random_range(50.0..400.0));
    l
}

fn generate_universe(n: usize) -> Vec<Listing> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|i| generate_random_listing(i, &mut rng)).collect()
}

fn benchmark_score_pair(c: &mut Criterion) {
    let listings = generate_universe(2);
    let engine = SimilarityEngine::new(EngineConfig::default());

    c.bench_function("score_pair", |b| {
        b.iter(|| {
            let scores = engine.score_pair(black_box(&listings[0]), black_box(&listings[1]));
            black_box(scores);
        });
    });
}

fn benchmark_rank_source(c: &mut Criterion) {
    let listings = generate_universe(1000);
    let engine = SimilarityEngine::new(EngineConfig::default());

    c.bench_function("rank_source_1000", |b| {
        b.iter(|| {
            let edges = engine.rank_source(black_box(&listings[0]), black_box(&listings));
            black_box(edges)
        });
    });
}

fn benchmark_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(10);

    for size in [100, 250, 500].iter() {
        let listings = generate_universe(*size);
        let engine = SimilarityEngine::new(EngineConfig::default());

        group.bench_with_input(BenchmarkId::new("exhaustive", size), size, |b, _| {
            b.iter(|| {
                let output = engine.run(black_box(&listings));
                black_box(output);
            });
        });
    }

    group.finish();
}

fn benchmark_cluster_prefilter(c: &mut Criterion) {
    let listings = generate_universe(500);
    let engine = SimilarityEngine::new(EngineConfig {
        same_cluster_only: true,
        ..EngineConfig::default()
    });

    c.bench_function("full_run_500_cluster_prefilter", |b| {
        b.iter(|| {
            let output = engine.run(black_box(&listings));
            black_box(output);
        });
    });
}

criterion_group!(
    benches,
    benchmark_score_pair,
    benchmark_rank_source,
    benchmark_full_run,
    benchmark_cluster_prefilter
);
criterion_main!(benches);
