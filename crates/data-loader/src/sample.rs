//! Built-in sample dataset.
//!
//! Substituted whenever the real CSV can't be loaded or processed, so the
//! engine always has something to answer queries from.

use crate::types::RawMovieRow;

/// (title, year, runtime, rating, votes, genre, language)
const FALLBACK_MOVIES: [(&str, &str, &str, &str, &str, &str, &str); 5] = [
    ("Khaleja", "2010", "170", "7.6", "8284", "Action, Comedy, Fantasy", "Telugu"),
    ("Baahubali", "2015", "159", "8.0", "25000", "Action, Drama", "Telugu"),
    ("KGF Chapter 1", "2018", "156", "8.2", "20000", "Action, Crime", "Kannada"),
    ("Pushpa: The Rise", "2021", "179", "7.6", "12000", "Action, Crime", "Telugu"),
    ("Arjun Reddy", "2017", "182", "8.1", "18000", "Drama, Romance", "Telugu"),
];

/// The sample as raw rows, so it goes through the same cleaning as a file
pub fn fallback_rows() -> Vec<RawMovieRow> {
    FALLBACK_MOVIES
        .iter()
        .map(|&(title, year, runtime, rating, votes, genre, language)| RawMovieRow {
            title: title.to_string(),
            language: language.to_string(),
            genre: genre.to_string(),
            year: year.to_string(),
            runtime: runtime.to_string(),
            rating: rating.to_string(),
            votes: votes.to_string(),
        })
        .collect()
}
