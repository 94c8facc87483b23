//! Keep only movies whose genre text mentions a requested genre.
//!
//! Matching is a case-insensitive substring test against the whole genre
//! text, not an exact tag comparison: "act" matches "Action, Drama".

use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieTable;
use sources::{Candidate, QueryContext};
use std::sync::Arc;

pub struct GenreFilter {
    table: Arc<MovieTable>,
    genres: Vec<String>,
}

impl GenreFilter {
    /// Blank entries are ignored; an empty list keeps nothing
    pub fn new(table: Arc<MovieTable>, genres: &[String]) -> Self {
        let genres = genres
            .iter()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();
        Self { table, genres }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &QueryContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                self.table.get_movie(candidate.movie_id).is_some_and(|movie| {
                    let genre = movie.genre.to_lowercase();
                    self.genres.iter().any(|wanted| genre.contains(wanted.as_str()))
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    fn candidates(table: &MovieTable) -> Vec<Candidate> {
        (0..table.len())
            .map(|id| Candidate::new(id, CandidateSource::Popularity, 1.0))
            .collect()
    }

    #[test]
    fn test_genre_filter_any_match() {
        let table = Arc::new(MovieTable::fallback(2024));
        let filter = GenreFilter::new(table.clone(), &["romance".to_string(), "Fantasy".to_string()]);
        let filtered = filter
            .apply(candidates(&table), &QueryContext::discovery(10))
            .unwrap();
        let ids: Vec<usize> = filtered.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![0, 4]);
    }

    #[test]
    fn test_genre_filter_substring() {
        let table = Arc::new(MovieTable::fallback(2024));
        let filter = GenreFilter::new(table.clone(), &["ACT".to_string()]);
        let filtered = filter
            .apply(candidates(&table), &QueryContext::discovery(10))
            .unwrap();
        assert_eq!(filtered.len(), 4);
    }
}
