//! Engine configuration.

use std::path::PathBuf;

/// Default location of the movies CSV, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data/indian movies.csv";

/// Upper bound on rows a single neighbor query may consider
pub const DEFAULT_MAX_NEIGHBORS: usize = 20;

/// Weights applied when fusing neighbor similarities.
///
/// Only `collaborative` and `content` enter the fused score; `popularity`
/// and `diversity` are carried for callers that report them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridWeights {
    pub collaborative: f64,
    pub content: f64,
    pub popularity: f64,
    pub diversity: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            collaborative: 0.5,
            content: 0.3,
            popularity: 0.2,
            diversity: 0.0,
        }
    }
}

/// Everything needed to build a `RecommendationEngine`
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub data_path: PathBuf,
    pub max_neighbors: usize,
    pub weights: HybridWeights,
    /// Year used for `movie_age`; the current calendar year when `None`
    pub reference_year: Option<i32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            max_neighbors: DEFAULT_MAX_NEIGHBORS,
            weights: HybridWeights::default(),
            reference_year: None,
        }
    }
}

impl EngineConfig {
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(data_loader::current_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/indian movies.csv"));
        assert_eq!(config.max_neighbors, 20);
        assert_eq!(config.weights.collaborative, 0.5);
        assert_eq!(config.weights.content, 0.3);
        assert_eq!(config.with_reference_year(2024).reference_year(), 2024);
    }
}
