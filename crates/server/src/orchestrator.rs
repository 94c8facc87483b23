//! # Recommendation Engine
//!
//! Owns the immutable snapshot (movie table, fitted feature spaces, both
//! cosine indexes) and answers the two query kinds against it.
//!
//! `smart_recommend`:
//! 1. Resolve the title (and optional language) to one row
//! 2. Build the row's dense vector on the fitted schema and its TF-IDF vector
//! 3. Fetch 2k neighbors from each index, excluding the row itself
//! 4. Fuse: weighted sum of similarities, stable sort by fused score
//! 5. Filter (query exclusion, optional year gap) and keep the first k
//!
//! `discover_movies`:
//! 1. Every row is a candidate scored by popularity
//! 2. Filter by language and genre
//! 3. Stable sort by popularity and keep the first k
//!
//! The engine is built once and only read afterwards, so one instance can
//! be shared by any number of callers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use data_loader::{DatasetOrigin, MovieId, MovieTable};
use pipeline::filters::{ExcludeQueryFilter, GenreFilter, LanguageFilter, YearGapFilter};
use pipeline::{FeatureEngineer, FeatureSpaces, FilterPipeline, TfidfVectorizer};
use sources::lookup::resolve_title;
use sources::{
    Candidate, CandidateSource, CollaborativeSource, ContentSource, CosineIndex, QueryContext,
    TitleLookup,
};

use crate::config::{EngineConfig, HybridWeights};
use crate::response::{EngineKind, LanguageOption, MovieResult, QueryError, QueryResult};

/// Default number of results for `smart_recommend`
pub const DEFAULT_RECOMMEND_K: usize = 5;
/// Default number of results for `discover_movies`
pub const DEFAULT_DISCOVER_K: usize = 10;

/// Hybrid movie recommender over one dataset snapshot
#[derive(Clone)]
pub struct RecommendationEngine {
    table: Arc<MovieTable>,
    engineer: FeatureEngineer,
    vectorizer: TfidfVectorizer,
    collaborative: CollaborativeSource,
    content: ContentSource,
    weights: HybridWeights,
}

impl RecommendationEngine {
    /// Load the configured dataset and build the engine over it.
    ///
    /// If the file can't be loaded, or the pipeline fails on its contents,
    /// the built-in sample is used instead. Only a failure on the sample
    /// itself is returned as an error.
    pub fn build(config: &EngineConfig) -> Result<Self> {
        let start = Instant::now();
        let reference_year = config.reference_year();

        let primary = MovieTable::load_from_file(&config.data_path, reference_year)
            .with_context(|| format!("Failed to load {}", config.data_path.display()))
            .and_then(|table| Self::from_table(table, config));

        let engine = match primary {
            Ok(engine) => engine,
            Err(err) => {
                warn!("{err:#}; falling back to the built-in sample dataset");
                Self::from_table(MovieTable::fallback(reference_year), config)
                    .context("Failed to build engine from the fallback dataset")?
            }
        };

        info!(
            "Recommendation engine ready: {} movies ({:?}) in {:.2?}",
            engine.len(),
            engine.origin(),
            start.elapsed()
        );
        Ok(engine)
    }

    /// Fit features and indexes over an already-loaded table
    pub fn from_table(table: MovieTable, config: &EngineConfig) -> Result<Self> {
        let spaces = FeatureSpaces::fit(&table).context("Failed to engineer features")?;

        let dense_index = CosineIndex::fit(spaces.dense, config.max_neighbors)
            .context("Failed to build collaborative index")?;
        let sparse_index = CosineIndex::fit(spaces.sparse, config.max_neighbors)
            .context("Failed to build content index")?;
        info!(
            "Built indexes: {} rows, dense dim {}, sparse dim {}, max neighbors {}",
            dense_index.len(),
            dense_index.dim(),
            sparse_index.dim(),
            dense_index.max_neighbors()
        );

        Ok(Self {
            table: Arc::new(table),
            engineer: spaces.engineer,
            vectorizer: spaces.vectorizer,
            collaborative: CollaborativeSource::new(Arc::new(dense_index)),
            content: ContentSource::new(Arc::new(sparse_index)),
            weights: config.weights,
        })
    }

    pub fn table(&self) -> &MovieTable {
        &self.table
    }

    pub fn origin(&self) -> &DatasetOrigin {
        self.table.origin()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn weights(&self) -> &HybridWeights {
        &self.weights
    }

    /// Movies similar to `title`.
    ///
    /// `language` picks one release when the title exists in several
    /// languages. `year_gap` is `"min-max"`; text that doesn't parse as a
    /// range means no year filtering.
    pub fn smart_recommend(
        &self,
        title: &str,
        language: Option<&str>,
        year_gap: Option<&str>,
        k: usize,
    ) -> QueryResult {
        let movie_id = match resolve_title(&self.table, title, language) {
            TitleLookup::Found(id) => id,
            TitleLookup::NotFound => {
                info!("No movie titled '{}'", title.trim());
                return Err(QueryError::NotFound);
            }
            TitleLookup::Ambiguous(choices) => {
                info!("'{}' matches {} releases", title.trim(), choices.len());
                return Err(QueryError::Ambiguous {
                    options: choices.into_iter().map(LanguageOption::from).collect(),
                });
            }
            TitleLookup::NotFoundForLanguage => {
                return Err(QueryError::NotFoundForLanguage {
                    title: title.to_string(),
                    language: language.unwrap_or_default().to_string(),
                });
            }
        };

        self.rank_similar(movie_id, year_gap, k).map_err(|err| {
            error!("Error in smart_recommend for '{}': {err:#}", title.trim());
            QueryError::Internal {
                engine: EngineKind::Recommendation,
            }
        })
    }

    fn rank_similar(&self, movie_id: MovieId, year_gap: Option<&str>, k: usize) -> Result<Vec<MovieResult>> {
        let movie = self
            .table
            .get_movie(movie_id)
            .with_context(|| format!("Resolved movie {movie_id} is not in the table"))?;
        let context = QueryContext::for_movie(movie_id, k);
        let fetch = context.limit.saturating_mul(2);

        let dense = self.engineer.transform(movie);
        let sparse = self.vectorizer.transform(&movie.content_text());

        let collaborative = self
            .collaborative
            .get_candidates(&dense, &context, fetch)
            .context("Collaborative neighbor query failed")?;
        let content = self
            .content
            .get_candidates(&sparse, &context, fetch)
            .context("Content neighbor query failed")?;
        info!(
            "'{}': {} collaborative + {} content candidates",
            movie.title,
            collaborative.len(),
            content.len()
        );

        let fused = fuse_candidates(collaborative, content, &self.weights);
        for candidate in &fused {
            debug!(
                "candidate {} ({:?}): fused {:.4}, collaborative {:?}, content {:?}",
                candidate.movie_id,
                candidate.source,
                candidate.base_score,
                candidate.metadata.collaborative_similarity,
                candidate.metadata.content_similarity
            );
        }

        let year_filter = year_gap.and_then(|raw| {
            let filter = YearGapFilter::parse(self.table.clone(), raw);
            if filter.is_none() {
                debug!("Ignoring malformed year gap '{raw}'");
            }
            filter
        });
        let filters = FilterPipeline::new()
            .add_filter(ExcludeQueryFilter)
            .add_optional_filter(year_filter);
        let filtered = filters
            .apply(fused, &context)
            .context("Failed to apply filters")?;

        self.to_results(filtered, &context, round_score)
    }

    /// Most popular movies matching any of `genres` and any of `languages`.
    ///
    /// A list that is absent or holds only blank entries doesn't filter.
    /// Genres match as substrings of the genre text.
    pub fn discover_movies(
        &self,
        genres: Option<&[String]>,
        languages: Option<&[String]>,
        k: usize,
    ) -> QueryResult {
        self.rank_popular(genres, languages, k).map_err(|err| {
            error!("Error in discover_movies: {err:#}");
            QueryError::Internal {
                engine: EngineKind::Discovery,
            }
        })?
    }

    fn rank_popular(
        &self,
        genres: Option<&[String]>,
        languages: Option<&[String]>,
        k: usize,
    ) -> Result<QueryResult> {
        let context = QueryContext::discovery(k);
        let candidates: Vec<Candidate> = self
            .table
            .iter()
            .map(|(id, movie)| Candidate::new(id, CandidateSource::Popularity, movie.popularity_score))
            .collect();

        let filters = FilterPipeline::new()
            .add_optional_filter(
                non_blank(languages).map(|languages| LanguageFilter::new(self.table.clone(), languages)),
            )
            .add_optional_filter(non_blank(genres).map(|genres| GenreFilter::new(self.table.clone(), genres)));
        let mut filtered = filters
            .apply(candidates, &context)
            .context("Failed to apply filters")?;
        info!("Discovery: {} movies match", filtered.len());

        if filtered.is_empty() {
            return Ok(Err(QueryError::NoMatches));
        }

        filtered.sort_by(|a, b| b.base_score.total_cmp(&a.base_score));
        Ok(Ok(self.to_results(filtered, &context, |score| score)?))
    }

    /// First `context.limit` candidates as output records
    fn to_results(
        &self,
        candidates: Vec<Candidate>,
        context: &QueryContext,
        score: impl Fn(f64) -> f64,
    ) -> Result<Vec<MovieResult>> {
        candidates
            .into_iter()
            .take(context.limit)
            .map(|candidate| {
                let movie = self
                    .table
                    .get_movie(candidate.movie_id)
                    .with_context(|| format!("Candidate {} is not in the table", candidate.movie_id))?;
                Ok(MovieResult::new(movie, score(candidate.base_score)))
            })
            .collect()
    }
}

/// Merge both neighbor lists into one ranked list.
///
/// A movie's fused score is the sum of `similarity × weight` over the lists
/// it appears in. Candidates keep first-seen order (collaborative first)
/// before a stable sort by fused score, descending.
pub fn fuse_candidates(
    collaborative: Vec<Candidate>,
    content: Vec<Candidate>,
    weights: &HybridWeights,
) -> Vec<Candidate> {
    let mut fused: Vec<Candidate> = Vec::with_capacity(collaborative.len() + content.len());
    let mut positions: HashMap<MovieId, usize> = HashMap::new();

    let weighted = collaborative
        .into_iter()
        .map(|c| (c, weights.collaborative))
        .chain(content.into_iter().map(|c| (c, weights.content)));

    for (candidate, weight) in weighted {
        let contribution = candidate.base_score * weight;
        match positions.get(&candidate.movie_id) {
            Some(&pos) => {
                let existing = &mut fused[pos];
                existing.base_score += contribution;
                if existing.source != candidate.source {
                    existing.source = CandidateSource::Hybrid;
                }
                if candidate.metadata.collaborative_similarity.is_some() {
                    existing.metadata.collaborative_similarity = candidate.metadata.collaborative_similarity;
                }
                if candidate.metadata.content_similarity.is_some() {
                    existing.metadata.content_similarity = candidate.metadata.content_similarity;
                }
            }
            None => {
                positions.insert(candidate.movie_id, fused.len());
                fused.push(Candidate {
                    base_score: contribution,
                    ..candidate
                });
            }
        }
    }

    fused.sort_by(|a, b| b.base_score.total_cmp(&a.base_score));
    fused
}

/// Round half away from zero to 3 decimals
fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

fn non_blank(values: Option<&[String]>) -> Option<&[String]> {
    values.filter(|values| values.iter().any(|v| !v.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: MovieId, source: CandidateSource, score: f64) -> Candidate {
        let mut candidate = Candidate::new(id, source, score);
        match source {
            CandidateSource::Content => candidate.metadata.content_similarity = Some(score),
            _ => candidate.metadata.collaborative_similarity = Some(score),
        }
        candidate
    }

    #[test]
    fn test_fuse_accumulates_both_signals() {
        let weights = HybridWeights::default();
        let fused = fuse_candidates(
            vec![
                candidate(1, CandidateSource::Collaborative, 0.9),
                candidate(2, CandidateSource::Collaborative, 0.8),
            ],
            vec![
                candidate(2, CandidateSource::Content, 1.0),
                candidate(3, CandidateSource::Content, 0.5),
            ],
            &weights,
        );

        let ids: Vec<MovieId> = fused.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!((fused[0].base_score - (0.8 * 0.5 + 1.0 * 0.3)).abs() < 1e-12);
        assert_eq!(fused[0].source, CandidateSource::Hybrid);
        assert_eq!(fused[0].metadata.collaborative_similarity, Some(0.8));
        assert_eq!(fused[0].metadata.content_similarity, Some(1.0));
        assert_eq!(fused[1].source, CandidateSource::Collaborative);
        assert_eq!(fused[1].metadata.content_similarity, None);
        assert!((fused[1].base_score - 0.45).abs() < 1e-12);
        assert!((fused[2].base_score - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_fuse_ties_keep_first_seen_order() {
        let weights = HybridWeights {
            collaborative: 1.0,
            content: 1.0,
            ..HybridWeights::default()
        };
        let fused = fuse_candidates(
            vec![candidate(7, CandidateSource::Collaborative, 0.5)],
            vec![candidate(4, CandidateSource::Content, 0.5)],
            &weights,
        );
        let ids: Vec<MovieId> = fused.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![7, 4]);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.12345), 0.123);
        assert_eq!(round_score(0.4567), 0.457);
        assert_eq!(round_score(1.0), 1.0);
    }

    #[test]
    fn test_non_blank() {
        let blanks = vec![" ".to_string(), String::new()];
        assert!(non_blank(Some(&blanks)).is_none());
        assert!(non_blank(Some(&[][..])).is_none());
        let some = vec!["Action".to_string()];
        assert!(non_blank(Some(&some)).is_some());
    }
}
