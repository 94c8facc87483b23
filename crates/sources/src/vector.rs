//! Vector types the neighbor index can search over.
//!
//! Dense feature rows are plain `Vec<f64>`; TF-IDF rows are `SparseVector`s
//! because only a handful of the vocabulary terms occur in any one movie.

/// A vector with the operations cosine distance needs
pub trait CosineVector: Send + Sync {
    /// Number of dimensions
    fn dim(&self) -> usize;

    /// Dot product with a vector of the same dimension
    fn dot(&self, other: &Self) -> f64;

    /// Euclidean norm
    fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl CosineVector for Vec<f64> {
    fn dim(&self) -> usize {
        self.len()
    }

    fn dot(&self, other: &Self) -> f64 {
        self.iter().zip(other.iter()).map(|(a, b)| a * b).sum()
    }
}

/// Sparse vector stored as sorted (index, value) pairs
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// All-zero vector of the given dimension
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from (index, value) pairs in any order.
    ///
    /// Repeated indices are summed, zeros are dropped, and indices outside
    /// `dim` are ignored.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut pairs: Vec<(usize, f64)> = pairs.into_iter().filter(|(i, _)| *i < dim).collect();
        pairs.sort_by_key(|(i, _)| *i);

        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            match indices.last() {
                Some(&last) if last == index => {
                    if let Some(v) = values.last_mut() {
                        *v += value;
                    }
                }
                _ => {
                    indices.push(index);
                    values.push(value);
                }
            }
        }

        let mut vector = Self { dim, indices, values };
        vector.retain_nonzero();
        vector
    }

    fn retain_nonzero(&mut self) {
        let (indices, values): (Vec<usize>, Vec<f64>) = self
            .indices
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (*i, *v))
            .unzip();
        self.indices = indices;
        self.values = values;
    }

    /// Value at `index` (0.0 when not stored)
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Number of stored non-zero entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Iterate stored (index, value) pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Scale every entry so the vector has unit length (no-op for zero vectors)
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }
}

impl CosineVector for SparseVector {
    fn dim(&self) -> usize {
        self.dim
    }

    fn dot(&self, other: &Self) -> f64 {
        // Merge-join over the two sorted index lists
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }
}

/// Cosine distance given precomputed norms.
///
/// A zero vector has no direction, so it is treated as maximally
/// dissimilar-but-orthogonal (distance 1.0) to everything.
pub fn cosine_distance<V: CosineVector>(a: &V, b: &V, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - a.dot(b) / (norm_a * norm_b)).clamp(0.0, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs(5, vec![(3, 1.0), (1, 2.0), (3, 0.5), (9, 4.0), (2, 0.0)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(1), 2.0);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(9), 0.0);
        assert_eq!(v.to_dense(), vec![0.0, 2.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn test_sparse_dot_matches_dense() {
        let a = SparseVector::from_pairs(4, vec![(0, 1.0), (2, 3.0)]);
        let b = SparseVector::from_pairs(4, vec![(2, 2.0), (3, 5.0)]);
        assert_eq!(a.dot(&b), 6.0);
        assert_eq!(a.to_dense().dot(&b.to_dense()), 6.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = SparseVector::from_pairs(3, vec![(0, 3.0), (1, 4.0)]);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);

        let mut zero = SparseVector::zeros(3);
        zero.l2_normalize();
        assert_eq!(zero.norm(), 0.0);
    }

    #[test]
    fn test_cosine_distance() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let c = vec![2.0, 0.0];
        let zero = vec![0.0, 0.0];

        assert!((cosine_distance(&a, &b, a.norm(), b.norm()) - 1.0).abs() < 1e-12);
        assert!(cosine_distance(&a, &c, a.norm(), c.norm()).abs() < 1e-12);
        assert_eq!(cosine_distance(&a, &zero, a.norm(), 0.0), 1.0);
    }
}
