//! Error types for index construction and neighbor queries.

use data_loader::MovieId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    /// An index needs at least one vector
    #[error("Cannot build a nearest-neighbor index over zero vectors")]
    EmptyIndex,

    /// A vector's dimension doesn't match the index
    #[error("Vector dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A movie id that isn't a row of the indexed table
    #[error("Movie {0} is not in the index")]
    UnknownMovie(MovieId),
}

pub type Result<T> = std::result::Result<T, IndexError>;
