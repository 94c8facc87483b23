//! MovieTable construction.
//!
//! This module turns raw rows into the immutable `MovieTable`:
//! - Clean every row (typed columns, derived attributes)
//! - Reject tables that are unusable as a whole (no rows)
//! - Provide the built-in sample table used when loading fails

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::sample;
use crate::types::*;
use chrono::Datelike;
use std::path::Path;
use tracing::info;

impl MovieTable {
    /// Load and clean the movie CSV at `path`.
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse the file into raw rows (required columns located by header)
    /// 2. Clean each row and derive `movie_age` / `popularity_score`
    /// 3. Refuse an empty table
    pub fn load_from_file(path: &Path, reference_year: i32) -> Result<Self> {
        info!("Loading movie dataset from {:?}", path);

        let rows = parser::parse_file(path)?;
        let mut table = Self::from_raw_rows(&rows, reference_year);
        if table.is_empty() {
            return Err(DataLoadError::EmptyDataset {
                file: path.display().to_string(),
            });
        }
        table.origin = DatasetOrigin::File(path.to_path_buf());

        info!("Loaded {} movies from {:?}", table.len(), path);
        Ok(table)
    }

    /// Clean raw rows into a table
    pub fn from_raw_rows(rows: &[RawMovieRow], reference_year: i32) -> Self {
        let movies = rows
            .iter()
            .map(|row| parser::clean_row(row, reference_year))
            .collect();
        Self::from_records(movies)
    }

    /// The built-in five-movie sample, cleaned exactly like a loaded file
    pub fn fallback(reference_year: i32) -> Self {
        let mut table = Self::from_raw_rows(&sample::fallback_rows(), reference_year);
        table.origin = DatasetOrigin::Fallback;
        table
    }

    /// Number of distinct languages and genre tags, for logging
    pub fn cardinality(&self) -> (usize, usize) {
        let mut languages: Vec<&str> = self.movies.iter().map(|m| m.language.as_str()).collect();
        languages.sort_unstable();
        languages.dedup();

        let mut genres: Vec<&str> = self
            .movies
            .iter()
            .flat_map(|m| m.genres.iter().map(String::as_str))
            .collect();
        genres.sort_unstable();
        genres.dedup();

        (languages.len(), genres.len())
    }
}

/// Popularity score: rating * ln(1 + votes)
///
/// This rewards both high ratings and many votes. Unknown inputs count as 0
/// so that a missing rating or vote count never makes the score unknown.
pub fn compute_popularity_score(rating: Option<f64>, votes: Option<u64>) -> f64 {
    let rating = rating.unwrap_or(0.0);
    let votes = votes.unwrap_or(0) as f64;
    rating * votes.ln_1p()
}

/// The calendar year used for `movie_age` when none is configured
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
