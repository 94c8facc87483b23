//! Year-gap filter: keep candidates released within an inclusive year range.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieTable;
use sources::{Candidate, QueryContext};
use std::sync::Arc;

/// Inclusive release-year range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Parse `"min-max"`, e.g. `"2016-2019"`.
    ///
    /// Anything else (missing dash, extra parts, non-numbers) is `None`,
    /// which callers treat as "no filter".
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split('-').map(str::trim).collect();
        match parts.as_slice() {
            [min, max] => Some(Self {
                min: min.parse().ok()?,
                max: max.parse().ok()?,
            }),
            _ => None,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Drops candidates whose release year is unknown or outside the range.
///
/// An inverted range (min > max) keeps nothing.
pub struct YearGapFilter {
    table: Arc<MovieTable>,
    range: YearRange,
}

impl YearGapFilter {
    pub fn new(table: Arc<MovieTable>, range: YearRange) -> Self {
        Self { table, range }
    }

    /// Filter built from raw `"min-max"` text; `None` when it doesn't parse
    pub fn parse(table: Arc<MovieTable>, raw: &str) -> Option<Self> {
        YearRange::parse(raw).map(|range| Self::new(table, range))
    }

    pub fn range(&self) -> YearRange {
        self.range
    }
}

impl Filter for YearGapFilter {
    fn name(&self) -> &str {
        "YearGapFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &QueryContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                self.table
                    .get_movie(candidate.movie_id)
                    .and_then(|movie| movie.year)
                    .is_some_and(|year| self.range.contains(year))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    fn all_candidates(table: &MovieTable) -> Vec<Candidate> {
        table
            .iter()
            .map(|(id, _)| Candidate::new(id, CandidateSource::Hybrid, 1.0))
            .collect()
    }

    #[test]
    fn test_parse_year_range() {
        assert_eq!(YearRange::parse("2016-2019"), Some(YearRange { min: 2016, max: 2019 }));
        assert_eq!(YearRange::parse(" 2016 - 2019 "), Some(YearRange { min: 2016, max: 2019 }));
        assert_eq!(YearRange::parse("garbage"), None);
        assert_eq!(YearRange::parse("2016"), None);
        assert_eq!(YearRange::parse("2016-2017-2018"), None);
        assert_eq!(YearRange::parse("abc-2019"), None);
        assert_eq!(YearRange::parse(""), None);
    }

    #[test]
    fn test_year_gap_inclusive() {
        // Fallback years: 2010, 2015, 2018, 2021, 2017
        let table = Arc::new(MovieTable::fallback(2024));
        let filter = YearGapFilter::parse(table.clone(), "2015-2018").unwrap();
        let filtered = filter
            .apply(all_candidates(&table), &QueryContext::discovery(5))
            .unwrap();
        let ids: Vec<usize> = filtered.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn test_year_gap_unknown_year_and_inverted_range() {
        let mut movies = MovieTable::fallback(2024).movies().to_vec();
        movies[2].year = None;
        let table = Arc::new(MovieTable::from_records(movies));

        let filter = YearGapFilter::new(table.clone(), YearRange { min: 2000, max: 2030 });
        let filtered = filter
            .apply(all_candidates(&table), &QueryContext::discovery(5))
            .unwrap();
        assert_eq!(filtered.len(), 4);
        assert!(filtered.iter().all(|c| c.movie_id != 2));

        let inverted = YearGapFilter::new(table.clone(), YearRange { min: 2019, max: 2016 });
        assert!(inverted
            .apply(all_candidates(&table), &QueryContext::discovery(5))
            .unwrap()
            .is_empty());
    }
}
