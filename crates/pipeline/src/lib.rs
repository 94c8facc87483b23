//! Feature engineering and post-filtering for movie candidates.
//!
//! This crate provides:
//! - `FeatureEngineer` and `FeatureSchema` for the dense numeric/categorical space
//! - `TfidfVectorizer` for the sparse genre/language text space
//! - `FeatureSpaces`, which fits both from one `MovieTable`
//! - the `Filter` trait, its implementations, and `FilterPipeline`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FeatureSpaces, FilterPipeline};
//! use pipeline::filters::*;
//!
//! let spaces = FeatureSpaces::fit(&table)?;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(ExcludeQueryFilter)
//!     .add_optional_filter(YearGapFilter::parse(table.clone(), "2016-2019"));
//! let filtered = pipeline.apply(candidates, &context)?;
//! ```

pub mod error;
pub mod schema;
pub mod features;
pub mod stopwords;
pub mod tfidf;
pub mod spaces;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;

// Re-export main types
pub use error::FeatureError;
pub use schema::{ColumnKey, FeatureColumn, FeatureSchema, NumericFeature};
pub use features::{FeatureEngineer, NumericStats};
pub use tfidf::TfidfVectorizer;
pub use spaces::FeatureSpaces;
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
