//! # Data Loader Crate
//!
//! This crate loads the Indian movies dataset and cleans it into typed rows.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, MovieTable)
//! - **parser**: Read the CSV file and clean messy cells
//! - **index**: Build the MovieTable and derived attributes
//! - **sample**: The built-in fallback dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieTable;
//! use std::path::Path;
//!
//! let table = MovieTable::load_from_file(Path::new("data/indian movies.csv"), 2024)
//!     .unwrap_or_else(|_| MovieTable::fallback(2024));
//!
//! for id in table.find_by_title("khaleja") {
//!     println!("{:?}", table.get_movie(id));
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod sample;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{compute_popularity_score, current_year};
pub use types::{
    // Type aliases
    MovieId,
    // Core types
    DatasetOrigin,
    MovieRecord,
    MovieTable,
    RawMovieRow,
};
