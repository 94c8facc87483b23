//! Exact cosine nearest-neighbor index.
//!
//! Brute force: every query computes the distance to every stored vector.
//! The corpus is a few thousand movies, so an exact scan is both fast
//! enough and free of approximation error.
//!
//! ## Algorithm
//! 1. At fit time, store the vectors and their norms
//! 2. At query time, compute all distances in parallel (Rayon)
//! 3. Order by (distance, movie id) so ties are deterministic
//! 4. Keep the nearest `min(k + self, max_neighbors)` and drop the query point

use crate::error::{IndexError, Result};
use crate::vector::{CosineVector, cosine_distance};
use data_loader::MovieId;
use rayon::prelude::*;

/// One result of a neighbor query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub movie_id: MovieId,
    /// Cosine distance in [0, 2]
    pub distance: f64,
}

impl Neighbor {
    /// Similarity score: 1 - cosine distance
    pub fn similarity(&self) -> f64 {
        1.0 - self.distance
    }
}

/// Cosine k-NN index over one feature space.
///
/// Immutable after `fit`; queries only take `&self`, so one index can serve
/// any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct CosineIndex<V> {
    vectors: Vec<V>,
    norms: Vec<f64>,
    dim: usize,
    max_neighbors: usize,
}

impl<V: CosineVector> CosineIndex<V> {
    /// Build an index, allowing queries of up to `min(neighbor_cap, N)` rows.
    ///
    /// Row `i` of `vectors` is movie id `i`.
    pub fn fit(vectors: Vec<V>, neighbor_cap: usize) -> Result<Self> {
        let dim = vectors.first().ok_or(IndexError::EmptyIndex)?.dim();
        if let Some(bad) = vectors.iter().find(|v| v.dim() != dim) {
            return Err(IndexError::DimensionMismatch {
                expected: dim,
                found: bad.dim(),
            });
        }

        let norms = vectors.par_iter().map(CosineVector::norm).collect();
        let max_neighbors = neighbor_cap.min(vectors.len());

        Ok(Self {
            vectors,
            norms,
            dim,
            max_neighbors,
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Upper bound on rows a single query may consider (query point included)
    pub fn max_neighbors(&self) -> usize {
        self.max_neighbors
    }

    /// Stored vector for a movie
    pub fn vector(&self, movie_id: MovieId) -> Result<&V> {
        self.vectors
            .get(movie_id)
            .ok_or(IndexError::UnknownMovie(movie_id))
    }

    /// The `k` nearest stored vectors to `query`, nearest first.
    ///
    /// When `exclude` is given that movie never appears in the output, and
    /// it counts against the `max_neighbors` budget the same way the query
    /// point itself would. Requests larger than the budget are clamped, never
    /// rejected.
    pub fn kneighbors(&self, query: &V, k: usize, exclude: Option<MovieId>) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                found: query.dim(),
            });
        }

        let query_norm = query.norm();
        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .par_iter()
            .zip(self.norms.par_iter())
            .enumerate()
            .map(|(movie_id, (vector, &norm))| Neighbor {
                movie_id,
                distance: cosine_distance(query, vector, query_norm, norm),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.movie_id.cmp(&b.movie_id))
        });

        let budget = k
            .saturating_add(usize::from(exclude.is_some()))
            .min(self.max_neighbors);
        neighbors.truncate(budget);
        neighbors.retain(|n| Some(n.movie_id) != exclude);
        neighbors.truncate(k);
        Ok(neighbors)
    }
}
