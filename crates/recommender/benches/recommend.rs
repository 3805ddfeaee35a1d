//! Benchmarks for similarity recommendations
//!
//! Run with: cargo bench --package recommender
//!
//! Uses a synthetic 5000-movie catalog, roughly the size of the TMDB 5000
//! dataset the similarity matrix is usually built from.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::{Catalog, DataIndex, Movie, SimilarityMatrix};
use recommender::{SimilarityRecommender, rank_neighbors};
use std::sync::Arc;

const CATALOG_SIZE: usize = 5000;

fn load_test_data() -> Arc<DataIndex> {
    let movies = (0..CATALOG_SIZE)
        .map(|i| Movie::new(i as u32, format!("Movie {i}")))
        .collect();
    let rows = (0..CATALOG_SIZE)
        .map(|i| {
            (0..CATALOG_SIZE)
                .map(|j| ((i * 31 + j * 17) % 1000) as f32 / 1000.0)
                .collect()
        })
        .collect();
    let matrix = SimilarityMatrix::from_rows(rows).expect("square matrix");
    Arc::new(DataIndex::new(Catalog::new(movies), matrix).expect("aligned index"))
}

fn bench_recommend(c: &mut Criterion) {
    let data_index = load_test_data();
    let recommender = SimilarityRecommender::new(data_index);

    c.bench_function("recommend_last_title", |b| {
        b.iter(|| {
            let recs = recommender.recommend(black_box("Movie 4999")).unwrap();
            black_box(recs)
        })
    });
}

fn bench_rank_neighbors(c: &mut Criterion) {
    let data_index = load_test_data();
    let row = data_index.similarity().row(42).unwrap().to_vec();

    c.bench_function("rank_neighbors", |b| {
        b.iter(|| black_box(rank_neighbors(black_box(&row), 42, 5)))
    });
}

criterion_group!(benches, bench_recommend, bench_rank_neighbors);
criterion_main!(benches);
