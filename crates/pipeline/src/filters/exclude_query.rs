//! Keeps the queried movie out of its own recommendations.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, QueryContext};

/// Removes the query's target movie; a no-op for discovery queries
pub struct ExcludeQueryFilter;

impl Filter for ExcludeQueryFilter {
    fn name(&self) -> &str {
        "ExcludeQueryFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &QueryContext) -> Result<Vec<Candidate>> {
        let Some(target) = context.target else {
            return Ok(candidates);
        };
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.movie_id != target)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    #[test]
    fn test_exclude_query_filter() {
        let candidates = vec![
            Candidate::new(3, CandidateSource::Hybrid, 0.9),
            Candidate::new(0, CandidateSource::Collaborative, 1.0),
            Candidate::new(2, CandidateSource::Content, 0.4),
        ];

        let filtered = ExcludeQueryFilter
            .apply(candidates.clone(), &QueryContext::for_movie(0, 5))
            .unwrap();
        let ids: Vec<usize> = filtered.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![3, 2]);

        let untouched = ExcludeQueryFilter
            .apply(candidates, &QueryContext::discovery(5))
            .unwrap();
        assert_eq!(untouched.len(), 3);
    }
}
