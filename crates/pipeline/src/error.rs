//! Error types for feature engineering.
//!
//! Any of these aborts engine construction for the current dataset; the
//! engine then retries with the built-in sample.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Nothing to fit on
    #[error("Cannot engineer features for an empty dataset")]
    EmptyCorpus,

    /// Median imputation needs at least one observed value
    #[error("Numeric column '{column}' has no observed values")]
    NoObservedValues { column: &'static str },

    /// Every document was empty or made only of stop words
    #[error("Empty vocabulary: documents contain no usable terms")]
    EmptyVocabulary,
}

pub type Result<T> = std::result::Result<T, FeatureError>;
