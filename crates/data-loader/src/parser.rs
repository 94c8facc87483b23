//! Parser and cleaner for the Indian movies CSV file.
//!
//! Two stages:
//! - `parse_rows` reads delimited text into `RawMovieRow`s, locating the
//!   required columns by (trimmed) header name
//! - `clean_row` turns one raw row into a typed `MovieRecord`
//!
//! The source data is messy: runtimes like `"170 min"`, vote counts like
//! `"8,284"`, stray quotes, and padded headers. None of that is an error;
//! a cell that still doesn't parse after cleaning is just a missing value.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const TITLE_COLUMN: &str = "Movie Name";
pub const LANGUAGE_COLUMN: &str = "Language";
pub const GENRE_COLUMN: &str = "Genre";
pub const YEAR_COLUMN: &str = "Year";
pub const RUNTIME_COLUMN: &str = "Timing";
pub const RATING_COLUMN: &str = "Rating(10)";
pub const VOTES_COLUMN: &str = "Votes";

/// Header some exports use for the runtime column
const MISNAMED_RUNTIME_COLUMN: &str = "Timing(min)";

/// Characters stripped from numeric cells before parsing: thousands
/// separators, the " min" suffix, and quotes.
const NUMERIC_NOISE: [char; 6] = [',', ' ', 'm', 'i', 'n', '"'];

/// Positions of the required columns within a header row
struct ColumnPositions {
    title: usize,
    language: usize,
    genre: usize,
    year: usize,
    runtime: usize,
    rating: usize,
    votes: usize,
}

/// Trim a header and map known aliases onto their canonical name
fn canonical_header(header: &str) -> &str {
    let trimmed = header.trim();
    if trimmed == MISNAMED_RUNTIME_COLUMN {
        RUNTIME_COLUMN
    } else {
        trimmed
    }
}

fn locate_columns(headers: &[String], file: &str) -> Result<ColumnPositions> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| canonical_header(h) == name)
            .ok_or_else(|| DataLoadError::MissingColumn {
                file: file.to_string(),
                column: name.to_string(),
            })
    };

    Ok(ColumnPositions {
        title: find(TITLE_COLUMN)?,
        language: find(LANGUAGE_COLUMN)?,
        genre: find(GENRE_COLUMN)?,
        year: find(YEAR_COLUMN)?,
        runtime: find(RUNTIME_COLUMN)?,
        rating: find(RATING_COLUMN)?,
        votes: find(VOTES_COLUMN)?,
    })
}

/// Read every data row of a CSV file
pub fn parse_file(path: &Path) -> Result<Vec<RawMovieRow>> {
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    parse_rows(file, &path.display().to_string())
}

/// Read every data row from any reader.
///
/// `file` is only used to label errors.
///
/// Rows shorter than the header are accepted (missing cells read as empty).
/// Bytes that aren't valid UTF-8 are replaced rather than rejected.
pub fn parse_rows<R: Read>(input: R, file: &str) -> Result<Vec<RawMovieRow>> {
    let csv_error = |source| DataLoadError::Csv {
        file: file.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let columns = locate_columns(&headers, file)?;

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(csv_error)?;
        let cell = |idx: usize| {
            record
                .get(idx)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        };

        // Skip blank lines that some editors leave at the end of the file
        if record.iter().all(|field| field.iter().all(u8::is_ascii_whitespace)) {
            continue;
        }

        rows.push(RawMovieRow {
            title: cell(columns.title),
            language: cell(columns.language),
            genre: cell(columns.genre),
            year: cell(columns.year),
            runtime: cell(columns.runtime),
            rating: cell(columns.rating),
            votes: cell(columns.votes),
        });
    }

    Ok(rows)
}

/// Strip formatting noise from a numeric cell and parse it.
///
/// Example: "8,284" -> Some(8284.0)
///          "170 min" -> Some(170.0)
///          "-" -> None
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !NUMERIC_NOISE.contains(c)).collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a release year, truncating any fractional part ("2015.0" -> 2015)
fn parse_year(raw: &str) -> Option<i32> {
    clean_numeric(raw).map(|year| year.trunc() as i32)
}

/// Parse a vote count; negative counts are treated as missing
fn parse_votes(raw: &str) -> Option<u64> {
    clean_numeric(raw)
        .filter(|votes| *votes >= 0.0)
        .map(|votes| votes.trunc() as u64)
}

/// Split comma-separated genre text into tags
///
/// Example: "Action, Comedy, Fantasy" -> ["Action", "Comedy", "Fantasy"]
pub fn parse_genres(genre: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in genre.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Turn one raw row into a typed record.
///
/// `reference_year` is the "current year" used for `movie_age`.
pub fn clean_row(raw: &RawMovieRow, reference_year: i32) -> MovieRecord {
    let genre = raw.genre.trim().to_string();
    let year = parse_year(&raw.year);
    let rating = clean_numeric(&raw.rating);
    let votes = parse_votes(&raw.votes);

    MovieRecord {
        title: raw.title.trim().to_string(),
        language: raw.language.trim().to_string(),
        genres: parse_genres(&genre),
        genre,
        year,
        runtime: clean_numeric(&raw.runtime),
        rating,
        votes,
        movie_age: year.map(|y| f64::from(reference_year) - f64::from(y)),
        popularity_score: crate::index::compute_popularity_score(rating, votes),
    }
}
