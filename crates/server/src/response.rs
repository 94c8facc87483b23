//! Result and error shapes returned to callers.
//!
//! Both serialize to the JSON objects the command-line tool prints.

use data_loader::MovieRecord;
use serde::Serialize;
use serde_json::{Value, json};
use sources::LanguageChoice;
use thiserror::Error;

/// One recommended or discovered movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieResult {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    pub similarity_score: f64,
}

impl MovieResult {
    pub fn new(movie: &MovieRecord, similarity_score: f64) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year,
            language: movie.language.clone(),
            genre: movie.genre.clone(),
            rating: movie.rating,
            similarity_score,
        }
    }
}

/// A (language, year) pair offered when a title is ambiguous
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
}

impl From<LanguageChoice> for LanguageOption {
    fn from(choice: LanguageChoice) -> Self {
        Self {
            language: choice.language,
            year: choice.year,
        }
    }
}

/// Which entry point an internal error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Recommendation,
    Discovery,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Recommendation => write!(f, "recommendation"),
            EngineKind::Discovery => write!(f, "discovery"),
        }
    }
}

/// Every outcome of a query other than a result list
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Movie not found")]
    NotFound,

    #[error("Multiple movies found")]
    Ambiguous { options: Vec<LanguageOption> },

    #[error("Movie '{title}' not found in '{language}'")]
    NotFoundForLanguage { title: String, language: String },

    #[error("No movies found with the selected criteria.")]
    NoMatches,

    #[error("An internal error occurred in the {engine} engine.")]
    Internal { engine: EngineKind },
}

impl QueryError {
    /// True when re-asking with a language would resolve the query
    pub fn requires_language(&self) -> bool {
        matches!(self, QueryError::Ambiguous { .. })
    }

    /// The error object printed in place of a result list
    pub fn to_json(&self) -> Value {
        let message = self.to_string();
        match self {
            QueryError::NotFound => json!({ "error": message, "requiresLanguage": false }),
            QueryError::Ambiguous { options } => json!({
                "error": message,
                "requiresLanguage": true,
                "languageOptions": options,
            }),
            _ => json!({ "error": message }),
        }
    }
}

pub type QueryResult = std::result::Result<Vec<MovieResult>, QueryError>;

/// JSON value for a query outcome: the result list or the error object
pub fn render(result: &QueryResult) -> Value {
    match result {
        Ok(movies) => json!(movies),
        Err(err) => err.to_json(),
    }
}
