//! Dense feature engineering.
//!
//! Turns cleaned movies into fixed-width vectors for the collaborative
//! index:
//! - numeric columns: median-imputed, then min-max scaled to [0, 1]
//! - language: one-hot, plus an unknown-language column
//! - genre tags: multi-hot
//!
//! Fitting records the statistics and the column schema; transforming a
//! movie always reindexes onto that schema, whether the movie was part of
//! the fitted corpus or not.

use crate::error::{FeatureError, Result};
use crate::schema::{ColumnKey, FeatureSchema, NumericFeature};
use data_loader::MovieRecord;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Imputation and scaling statistics for one numeric column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl NumericStats {
    /// Fit over a column; `None` when no value is observed
    pub fn fit(values: impl IntoIterator<Item = Option<f64>>) -> Option<Self> {
        let mut observed: Vec<f64> = values.into_iter().flatten().collect();
        if observed.is_empty() {
            return None;
        }
        observed.sort_by(f64::total_cmp);

        let mid = observed.len() / 2;
        let median = if observed.len() % 2 == 0 {
            (observed[mid - 1] + observed[mid]) / 2.0
        } else {
            observed[mid]
        };

        // The median lies inside the observed range, so imputing it never
        // moves min or max.
        Some(Self {
            median,
            min: observed[0],
            max: observed[observed.len() - 1],
        })
    }

    /// Impute a missing value with the median, then scale to [0, 1].
    ///
    /// A constant column (min == max) scales to 0.0.
    pub fn scale(&self, value: Option<f64>) -> f64 {
        let value = value.unwrap_or(self.median);
        let range = self.max - self.min;
        if range > 0.0 {
            (value - self.min) / range
        } else {
            0.0
        }
    }
}

/// Fitted dense feature transformer.
///
/// ## Performance Note
/// `transform_all` uses Rayon; output order always matches input order.
#[derive(Debug, Clone)]
pub struct FeatureEngineer {
    schema: FeatureSchema,
    numeric: Vec<(NumericFeature, NumericStats)>,
}

impl FeatureEngineer {
    /// Fit statistics and the column schema on the whole corpus.
    ///
    /// Column order: numeric features, languages (sorted, unknown last),
    /// genre tags (sorted).
    pub fn fit(movies: &[MovieRecord]) -> Result<Self> {
        if movies.is_empty() {
            return Err(FeatureError::EmptyCorpus);
        }

        let numeric = NumericFeature::ALL
            .iter()
            .map(|&feature| {
                NumericStats::fit(movies.iter().map(|m| feature.extract(m)))
                    .map(|stats| (feature, stats))
                    .ok_or(FeatureError::NoObservedValues {
                        column: feature.name(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let languages: BTreeSet<&str> = movies
            .iter()
            .filter(|m| !m.has_unknown_language())
            .map(|m| m.language.as_str())
            .collect();
        let genres: BTreeSet<&str> = movies
            .iter()
            .flat_map(|m| m.genres.iter().map(String::as_str))
            .collect();

        let keys = numeric
            .iter()
            .map(|(feature, _)| ColumnKey::Numeric(*feature))
            .chain(
                languages
                    .into_iter()
                    .map(|l| ColumnKey::Language(Some(l.to_string()))),
            )
            .chain(std::iter::once(ColumnKey::Language(None)))
            .chain(genres.into_iter().map(|g| ColumnKey::Genre(g.to_string())));

        Ok(Self {
            schema: FeatureSchema::new(keys),
            numeric,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn stats(&self, feature: NumericFeature) -> Option<&NumericStats> {
        self.numeric
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, stats)| stats)
    }

    /// Labelled feature values for one movie, before reindexing.
    ///
    /// May contain labels the schema doesn't know (a language or genre never
    /// seen at fit time); `transform` drops those.
    pub fn expand(&self, movie: &MovieRecord) -> Vec<(ColumnKey, f64)> {
        let mut labelled: Vec<(ColumnKey, f64)> = self
            .numeric
            .iter()
            .map(|(feature, stats)| (ColumnKey::Numeric(*feature), stats.scale(feature.extract(movie))))
            .collect();

        let language = (!movie.has_unknown_language()).then(|| movie.language.clone());
        labelled.push((ColumnKey::Language(language), 1.0));

        labelled.extend(movie.genres.iter().map(|g| (ColumnKey::Genre(g.clone()), 1.0)));
        labelled
    }

    /// Dense vector for one movie, laid out on the fitted schema
    pub fn transform(&self, movie: &MovieRecord) -> Vec<f64> {
        self.schema.reindex(&self.expand(movie))
    }

    /// Dense vectors for many movies, in input order
    pub fn transform_all(&self, movies: &[MovieRecord]) -> Vec<Vec<f64>> {
        movies.par_iter().map(|movie| self.transform(movie)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieTable;

    fn fallback_movies() -> Vec<MovieRecord> {
        MovieTable::fallback(2024).movies().to_vec()
    }

    #[test]
    fn test_numeric_stats_median() {
        let odd = NumericStats::fit(vec![Some(3.0), None, Some(1.0), Some(2.0)]).unwrap();
        assert_eq!(odd.median, 2.0);
        assert_eq!((odd.min, odd.max), (1.0, 3.0));

        let even = NumericStats::fit(vec![Some(4.0), Some(1.0), Some(2.0), Some(3.0)]).unwrap();
        assert_eq!(even.median, 2.5);

        assert!(NumericStats::fit(vec![None, None]).is_none());
    }

    #[test]
    fn test_scale_imputes_median() {
        let stats = NumericStats::fit(vec![Some(0.0), Some(5.0), Some(10.0)]).unwrap();
        assert_eq!(stats.scale(Some(10.0)), 1.0);
        assert_eq!(stats.scale(None), 0.5);
    }

    #[test]
    fn test_constant_column_scales_to_zero() {
        let stats = NumericStats::fit(vec![Some(7.0), Some(7.0)]).unwrap();
        assert_eq!(stats.scale(Some(7.0)), 0.0);
        assert_eq!(stats.scale(None), 0.0);
    }

    #[test]
    fn test_fit_schema_layout() {
        let engineer = FeatureEngineer::fit(&fallback_movies()).unwrap();
        let names = engineer.schema().names();

        assert_eq!(
            names,
            vec![
                "year_norm",
                "runtime_norm",
                "rating_norm",
                "votes_norm",
                "movie_age_norm",
                "popularity_score_norm",
                "lang_Kannada",
                "lang_Telugu",
                "lang_unknown",
                "genre_Action",
                "genre_Comedy",
                "genre_Crime",
                "genre_Drama",
                "genre_Fantasy",
                "genre_Romance",
            ]
        );
    }

    #[test]
    fn test_fit_rejects_empty_and_unobserved() {
        assert_eq!(FeatureEngineer::fit(&[]).unwrap_err(), FeatureError::EmptyCorpus);

        let mut movies = fallback_movies();
        for movie in &mut movies {
            movie.runtime = None;
        }
        assert_eq!(
            FeatureEngineer::fit(&movies).unwrap_err(),
            FeatureError::NoObservedValues { column: "runtime" }
        );
    }

    #[test]
    fn test_transform_khaleja() {
        let movies = fallback_movies();
        let engineer = FeatureEngineer::fit(&movies).unwrap();
        let vector = engineer.transform(&movies[0]);
        let schema = engineer.schema();

        // Oldest movie: year scales to 0, age to 1
        assert_eq!(vector[0], 0.0);
        assert_eq!(vector[4], 1.0);
        let telugu = schema.position(&ColumnKey::Language(Some("Telugu".to_string()))).unwrap();
        assert_eq!(vector[telugu], 1.0);
        for tag in ["Action", "Comedy", "Fantasy"] {
            let pos = schema.position(&ColumnKey::Genre(tag.to_string())).unwrap();
            assert_eq!(vector[pos], 1.0);
        }
        let drama = schema.position(&ColumnKey::Genre("Drama".to_string())).unwrap();
        assert_eq!(vector[drama], 0.0);
    }

    #[test]
    fn test_unseen_categories_are_dropped() {
        let movies = fallback_movies();
        let engineer = FeatureEngineer::fit(&movies).unwrap();

        let mut stranger = movies[1].clone();
        stranger.language = "Marathi".to_string();
        stranger.genres = vec!["Horror".to_string(), "Drama".to_string()];
        let vector = engineer.transform(&stranger);

        assert_eq!(vector.len(), engineer.schema().len());
        let language_sum: f64 = engineer
            .schema()
            .positions_where(ColumnKey::is_language)
            .into_iter()
            .map(|pos| vector[pos])
            .sum();
        assert_eq!(language_sum, 0.0);
    }

    #[test]
    fn test_unknown_language_column() {
        let mut movies = fallback_movies();
        movies[2].language = String::new();
        let engineer = FeatureEngineer::fit(&movies).unwrap();

        let vector = engineer.transform(&movies[2]);
        let unknown = engineer.schema().position(&ColumnKey::Language(None)).unwrap();
        assert_eq!(vector[unknown], 1.0);
        assert!(engineer
            .schema()
            .position(&ColumnKey::Language(Some("Kannada".to_string())))
            .is_none());
    }

    #[test]
    fn test_transform_all_preserves_order() {
        let movies = fallback_movies();
        let engineer = FeatureEngineer::fit(&movies).unwrap();
        let all = engineer.transform_all(&movies);

        assert_eq!(all.len(), movies.len());
        for (movie, row) in movies.iter().zip(all.iter()) {
            assert_eq!(&engineer.transform(movie), row);
        }
    }
}
