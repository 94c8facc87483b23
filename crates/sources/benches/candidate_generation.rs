//! Benchmarks for neighbor queries
//!
//! Run with: cargo bench --package sources
//!
//! Uses a synthetic corpus shaped like the engineered movie features:
//! ~3000 rows of 6 numeric columns plus a sparse one-hot tail.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sources::{CosineIndex, SparseVector};

const ROWS: usize = 3000;
const DENSE_DIM: usize = 40;
const TERMS: usize = 100;

fn dense_rows() -> Vec<Vec<f64>> {
    (0..ROWS)
        .map(|row| {
            (0..DENSE_DIM)
                .map(|col| {
                    if col < 6 {
                        ((row * 31 + col * 17) % 997) as f64 / 997.0
                    } else if (row + col) % 9 == 0 {
                        1.0
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

fn sparse_rows() -> Vec<SparseVector> {
    (0..ROWS)
        .map(|row| {
            let mut v = SparseVector::from_pairs(
                TERMS,
                (0..4).map(|t| ((row * 7 + t * 13) % TERMS, 1.0 + t as f64)),
            );
            v.l2_normalize();
            v
        })
        .collect()
}

fn bench_dense_kneighbors(c: &mut Criterion) {
    let index = CosineIndex::fit(dense_rows(), 20).expect("Failed to build dense index");
    let query = index.vector(42).expect("row exists").clone();

    c.bench_function("dense_kneighbors", |b| {
        b.iter(|| {
            let neighbors = index.kneighbors(black_box(&query), black_box(10), Some(42));
            black_box(neighbors)
        })
    });
}

fn bench_sparse_kneighbors(c: &mut Criterion) {
    let index = CosineIndex::fit(sparse_rows(), 20).expect("Failed to build sparse index");
    let query = index.vector(42).expect("row exists").clone();

    c.bench_function("sparse_kneighbors", |b| {
        b.iter(|| {
            let neighbors = index.kneighbors(black_box(&query), black_box(10), Some(42));
            black_box(neighbors)
        })
    });
}

criterion_group!(benches, bench_dense_kneighbors, bench_sparse_kneighbors);
criterion_main!(benches);
