//! Keep only movies in one of the requested languages.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieTable;
use sources::{Candidate, QueryContext};
use std::sync::Arc;

/// Case-insensitive language membership filter
pub struct LanguageFilter {
    table: Arc<MovieTable>,
    languages: Vec<String>,
}

impl LanguageFilter {
    /// Blank entries are ignored; an empty list keeps nothing
    pub fn new(table: Arc<MovieTable>, languages: &[String]) -> Self {
        let languages = languages
            .iter()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Self { table, languages }
    }
}

impl Filter for LanguageFilter {
    fn name(&self) -> &str {
        "LanguageFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &QueryContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                self.table.get_movie(candidate.movie_id).is_some_and(|movie| {
                    let language = movie.language.to_lowercase();
                    self.languages.contains(&language)
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    #[test]
    fn test_language_filter() {
        let table = Arc::new(MovieTable::fallback(2024));
        let candidates: Vec<Candidate> = (0..table.len())
            .map(|id| Candidate::new(id, CandidateSource::Popularity, 1.0))
            .collect();

        let filter = LanguageFilter::new(table.clone(), &[" KANNADA ".to_string()]);
        let filtered = filter
            .apply(candidates.clone(), &QueryContext::discovery(10))
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].movie_id, 2);

        let filter = LanguageFilter::new(table, &["telugu".to_string(), "Tamil".to_string()]);
        let filtered = filter.apply(candidates, &QueryContext::discovery(10)).unwrap();
        assert_eq!(filtered.len(), 4);
    }
}
