//! Collaborative Source - neighbors in the dense feature space
//!
//! Generates candidates from movies whose normalized numeric profile
//! (year, runtime, rating, votes, age, popularity) and one-hot
//! language / multi-hot genre columns point in the same direction as the
//! target movie's.
//!
//! ## Algorithm
//! 1. Take the target's dense vector (already reindexed onto the fitted schema)
//! 2. Ask the cosine index for the nearest rows, excluding the target
//! 3. Score each neighbor by similarity = 1 - cosine distance

use crate::error::Result;
use crate::index::{CosineIndex, Neighbor};
use crate::types::{Candidate, CandidateSource, QueryContext};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Collaborative source over the dense feature index
#[derive(Clone)]
pub struct CollaborativeSource {
    /// Shared read-only index; cloning the source is cheap
    index: Arc<CosineIndex<Vec<f64>>>,
}

impl CollaborativeSource {
    pub fn new(index: Arc<CosineIndex<Vec<f64>>>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CosineIndex<Vec<f64>> {
        &self.index
    }

    /// Generate up to `limit` candidates similar to `query`
    #[instrument(skip(self, query, context), fields(target = ?context.target))]
    pub fn get_candidates(
        &self,
        query: &Vec<f64>,
        context: &QueryContext,
        limit: usize,
    ) -> Result<Vec<Candidate>> {
        let neighbors = self.index.kneighbors(query, limit, context.target)?;
        let candidates = neighbors_to_candidates(neighbors, CandidateSource::Collaborative);

        debug!("Generated {} collaborative candidates", candidates.len());
        Ok(candidates)
    }
}

/// Convert index results into candidates tagged with their source
pub(crate) fn neighbors_to_candidates(
    neighbors: Vec<Neighbor>,
    source: CandidateSource,
) -> Vec<Candidate> {
    neighbors
        .into_iter()
        .map(|neighbor| {
            let similarity = neighbor.similarity();
            let mut candidate = Candidate::new(neighbor.movie_id, source, similarity);
            match source {
                CandidateSource::Content => candidate.metadata.content_similarity = Some(similarity),
                _ => candidate.metadata.collaborative_similarity = Some(similarity),
            }
            candidate
        })
        .collect()
}
