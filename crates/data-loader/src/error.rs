//! Error types for the data-loader crate.
//!
//! Every variant here is recoverable from the engine's point of view: a
//! failed load is answered by substituting the built-in sample dataset.

use thiserror::Error;

/// Errors that can occur while reading and cleaning the movie table
///
/// Per-cell parse failures are NOT errors: an unparseable number simply
/// becomes a missing value. Only problems that make the whole table
/// unusable show up here.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid delimited text
    #[error("Malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A column the cleaner depends on is absent from the header row
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// The header parsed but no data rows followed it
    #[error("Dataset {file} contains no movies")]
    EmptyDataset { file: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
