//! Server crate for the hybrid movie recommender.
//!
//! This crate contains the engine that ties the data, feature, index and
//! filter crates together, its configuration, and the response shapes
//! callers receive.
//!
//! ```ignore
//! use server::{EngineConfig, RecommendationEngine, render};
//!
//! let engine = RecommendationEngine::build(&EngineConfig::default())?;
//! let result = engine.smart_recommend("Khaleja", None, Some("2010-2020"), 5);
//! println!("{}", render(&result));
//! ```

pub mod config;
pub mod orchestrator;
pub mod response;

pub use config::{EngineConfig, HybridWeights};
pub use orchestrator::{DEFAULT_DISCOVER_K, DEFAULT_RECOMMEND_K, RecommendationEngine, fuse_candidates};
pub use response::{EngineKind, LanguageOption, MovieResult, QueryError, QueryResult, render};
