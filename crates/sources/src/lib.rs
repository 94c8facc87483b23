//! # Sources Crate
//!
//! This crate holds the nearest-neighbor machinery behind recommendations.
//!
//! ## Components
//!
//! ### Cosine Index
//! Exact brute-force k-NN over either dense (`Vec<f64>`) or sparse
//! (`SparseVector`) rows, generic over the `CosineVector` trait.
//!
//! ### Collaborative Source
//! Neighbors in the dense numeric + one-hot feature space.
//!
//! ### Content Source
//! Neighbors in the TF-IDF genre/language text space.
//!
//! ### Title Lookup
//! Resolves a typed title (and optional language) to one table row, or
//! explains why it can't.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CollaborativeSource, CosineIndex, QueryContext, lookup::resolve_title};
//! use std::sync::Arc;
//!
//! let index = Arc::new(CosineIndex::fit(dense_rows, 20)?);
//! let collaborative = CollaborativeSource::new(index);
//!
//! if let TitleLookup::Found(id) = resolve_title(&table, "Khaleja", None) {
//!     let context = QueryContext::for_movie(id, 5);
//!     let candidates = collaborative.get_candidates(&query_vector, &context, 10)?;
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod vector;
pub mod index;
pub mod lookup;
pub mod collaborative;
pub mod content;

// Re-export commonly used types
pub use error::IndexError;
pub use types::{Candidate, CandidateMetadata, CandidateSource, QueryContext};
pub use vector::{CosineVector, SparseVector};
pub use index::{CosineIndex, Neighbor};
pub use lookup::{LanguageChoice, TitleLookup};
pub use collaborative::CollaborativeSource;
pub use content::ContentSource;
