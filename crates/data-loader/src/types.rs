//! Core domain types for the movie table.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `MovieId`: a movie's row position in the table
//! - `RawMovieRow`: the untyped text cells of one CSV row
//! - `MovieRecord`: a cleaned, typed row with derived attributes
//! - `MovieTable`: the immutable in-memory snapshot every query reads

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in its `MovieTable`.
///
/// Titles are not unique (regional releases share a name), so the row
/// position is the only stable identity a movie has.
pub type MovieId = usize;

// =============================================================================
// Movie-related Types
// =============================================================================

/// One row exactly as it came out of the CSV file, before any cleaning.
///
/// Cells are kept as text so that the cleaner, not the CSV reader, decides
/// what counts as a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMovieRow {
    pub title: String,
    pub language: String,
    pub genre: String,
    pub year: String,
    pub runtime: String,
    pub rating: String,
    pub votes: String,
}

/// A cleaned movie row.
///
/// Rust concept: `Option<T>` represents a value that may or may not exist.
/// Every numeric attribute here may be unknown in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// Empty when the source row had no language ("unknown language")
    pub language: String,
    /// Genre text as written in the source, e.g. "Action, Comedy"
    pub genre: String,
    /// Parsed genre tags in first-seen order, without duplicates
    pub genres: Vec<String>,
    pub year: Option<i32>,
    /// Runtime in minutes
    pub runtime: Option<f64>,
    /// Rating on a 0-10 scale
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    /// Reference year minus release year
    pub movie_age: Option<f64>,
    /// rating * ln(1 + votes), with unknown inputs counted as 0
    pub popularity_score: f64,
}

impl MovieRecord {
    /// True when the source row carried no language
    pub fn has_unknown_language(&self) -> bool {
        self.language.is_empty()
    }

    /// Genre and language concatenated into one document for text features
    pub fn content_text(&self) -> String {
        format!("{} {}", self.genre, self.language)
    }
}

/// Where a `MovieTable` came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetOrigin {
    /// Loaded and cleaned from a CSV file
    File(PathBuf),
    /// The built-in five-movie sample
    Fallback,
    /// Built directly from records (tests, embedding callers)
    InMemory,
}

// =============================================================================
// MovieTable - The In-Memory Snapshot
// =============================================================================

/// Immutable table of cleaned movies.
///
/// Built once per engine; every query borrows it read-only.
#[derive(Debug, Clone)]
pub struct MovieTable {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) origin: DatasetOrigin,
}

impl MovieTable {
    /// Wrap already-cleaned records
    pub fn from_records(movies: Vec<MovieRecord>) -> Self {
        Self {
            movies,
            origin: DatasetOrigin::InMemory,
        }
    }

    /// Get a movie by row position
    pub fn get_movie(&self, id: MovieId) -> Option<&MovieRecord> {
        self.movies.get(id)
    }

    /// All movies in row order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Iterate `(MovieId, &MovieRecord)` pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (MovieId, &MovieRecord)> {
        self.movies.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn origin(&self) -> &DatasetOrigin {
        &self.origin
    }

    /// Find every row whose title equals `title`, ignoring case and
    /// surrounding whitespace.
    ///
    /// Returns an empty Vec when nothing matches; more than one id when the
    /// title was released in several languages or years.
    pub fn find_by_title(&self, title: &str) -> Vec<MovieId> {
        let wanted = title.trim().to_lowercase();
        self.iter()
            .filter(|(_, movie)| movie.title.to_lowercase() == wanted)
            .map(|(id, _)| id)
            .collect()
    }
}
