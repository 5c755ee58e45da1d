//! Benchmarks for recommender construction and queries
//!
//! Run with: cargo bench --package engine
//!
//! Uses a synthetic ratings CSV (deterministic LCG) so the bench does not
//! depend on scraped data being present.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::{Recommender, RecommenderOptions};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

const N_MOVIES: usize = 300;
const N_USERS: usize = 200;
const N_RATINGS: usize = 20_000;

/// Write a deterministic synthetic ratings file and return its path.
fn write_synthetic_csv(dir: &std::path::Path) -> PathBuf {
    let tokens = data_loader::STAR_TOKENS;
    let mut contents = String::from("User, Film ID, Rating\n");

    // Small multiplicative congruential generator, fixed seed
    let mut state: u64 = 0x5DEECE66D;
    let mut next = |bound: usize| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) as usize) % bound
    };

    for _ in 0..N_RATINGS {
        let user = next(N_USERS);
        let movie = next(N_MOVIES);
        let token = tokens[next(tokens.len())];
        writeln!(contents, "user-{}, movie-{}, {}", user, movie, token).unwrap();
    }

    let path = dir.join("synthetic.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn bench_create_recommender(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_synthetic_csv(dir.path());
    let options = RecommenderOptions::new(&path).with_use_cache(false);

    c.bench_function("create_recommender", |b| {
        b.iter(|| {
            let recommender = Recommender::new(black_box(&options)).unwrap();
            black_box(recommender)
        })
    });
}

fn bench_load_from_cache(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_synthetic_csv(dir.path());
    let options = RecommenderOptions::new(&path).with_use_cache(true);

    // Warm the cache once
    Recommender::new(&options).unwrap();

    c.bench_function("load_recommender_from_cache", |b| {
        b.iter(|| {
            let recommender = Recommender::new(black_box(&options)).unwrap();
            black_box(recommender)
        })
    });
}

fn bench_get_recommendations(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_synthetic_csv(dir.path());
    let options = RecommenderOptions::new(&path).with_use_cache(false);
    let recommender = Recommender::new(&options).unwrap();

    c.bench_function("get_recommendations", |b| {
        b.iter(|| {
            let results = recommender
                .recommend(black_box("movie-7"), black_box(8), black_box(true))
                .unwrap();
            black_box(results)
        })
    });
}

criterion_group!(
    benches,
    bench_create_recommender,
    bench_load_from_cache,
    bench_get_recommendations
);
criterion_main!(benches);
