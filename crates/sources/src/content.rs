//! Content Source - neighbors in the TF-IDF text space
//!
//! Each movie's genre and language text is vectorized with TF-IDF;
//! movies sharing rare terms ("fantasy", "kannada") score higher than
//! movies sharing common ones ("action").

use crate::collaborative::neighbors_to_candidates;
use crate::error::Result;
use crate::index::CosineIndex;
use crate::types::{Candidate, CandidateSource, QueryContext};
use crate::vector::SparseVector;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Content source over the sparse TF-IDF index
#[derive(Clone)]
pub struct ContentSource {
    index: Arc<CosineIndex<SparseVector>>,
}

impl ContentSource {
    pub fn new(index: Arc<CosineIndex<SparseVector>>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CosineIndex<SparseVector> {
        &self.index
    }

    /// Generate up to `limit` candidates whose text profile resembles `query`
    #[instrument(skip(self, query, context), fields(target = ?context.target))]
    pub fn get_candidates(
        &self,
        query: &SparseVector,
        context: &QueryContext,
        limit: usize,
    ) -> Result<Vec<Candidate>> {
        let neighbors = self.index.kneighbors(query, limit, context.target)?;
        let candidates = neighbors_to_candidates(neighbors, CandidateSource::Content);

        debug!(
            "Generated {} content candidates (query terms: {})",
            candidates.len(),
            query.nnz()
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_candidates() {
        let index = CosineIndex::fit(
            vec![
                SparseVector::from_pairs(3, vec![(0, 0.8), (1, 0.6)]),
                SparseVector::from_pairs(3, vec![(2, 1.0)]),
                SparseVector::from_pairs(3, vec![(0, 1.0)]),
            ],
            20,
        )
        .unwrap();
        let source = ContentSource::new(Arc::new(index));
        let query = source.index().vector(0).unwrap().clone();

        let candidates = source
            .get_candidates(&query, &QueryContext::for_movie(0, 5), 5)
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].movie_id, 2);
        assert!((candidates[0].base_score - 0.8).abs() < 1e-12);
        assert_eq!(candidates[0].source, CandidateSource::Content);
        assert_eq!(candidates[0].metadata.content_similarity, Some(candidates[0].base_score));
        assert_eq!(candidates[1].movie_id, 1);
    }
}
