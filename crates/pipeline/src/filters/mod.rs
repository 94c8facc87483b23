//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod exclude_query;
pub mod genre;
pub mod language;
pub mod year_gap;

// Re-export for convenience
pub use exclude_query::ExcludeQueryFilter;
pub use genre::GenreFilter;
pub use language::LanguageFilter;
pub use year_gap::{YearGapFilter, YearRange};
