//! Shared types for candidate generation.

use data_loader::MovieId;

/// Which signal produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Neighbor in the dense numeric/categorical feature space
    Collaborative,
    /// Neighbor in the sparse TF-IDF genre/language space
    Content,
    /// Found by both neighbor searches; scores were fused
    Hybrid,
    /// Ranked by popularity alone (discovery)
    Popularity,
}

/// Per-signal similarities kept alongside the fused score
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateMetadata {
    pub collaborative_similarity: Option<f64>,
    pub content_similarity: Option<f64>,
}

/// A movie proposed for the result list
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie_id: MovieId,
    pub source: CandidateSource,
    /// Similarity (1 - cosine distance), fused score, or popularity
    pub base_score: f64,
    pub metadata: CandidateMetadata,
}

impl Candidate {
    pub fn new(movie_id: MovieId, source: CandidateSource, base_score: f64) -> Self {
        Self {
            movie_id,
            source,
            base_score,
            metadata: CandidateMetadata::default(),
        }
    }
}

/// What a query is about.
///
/// Built once per request and handed to every source and filter.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContext {
    /// The movie recommendations are requested for; `None` for discovery
    pub target: Option<MovieId>,
    /// How many results the caller wants
    pub limit: usize,
}

impl QueryContext {
    pub fn for_movie(target: MovieId, limit: usize) -> Self {
        Self {
            target: Some(target),
            limit,
        }
    }

    pub fn discovery(limit: usize) -> Self {
        Self {
            target: None,
            limit,
        }
    }
}
