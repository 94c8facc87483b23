//! The fitted dense feature schema.
//!
//! One-hot and multi-hot expansion make the column set depend on the data
//! (every distinct language and genre tag becomes a column). The schema
//! freezes that column list once, at fit time, and every vector the engine
//! builds afterwards is reindexed onto it: columns the row lacks are
//! zero-filled, columns the schema doesn't know are dropped. Without that
//! step a query vector could silently misalign with the index.

use data_loader::MovieRecord;
use std::collections::HashMap;

/// Numeric attributes that are imputed and min-max scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericFeature {
    Year,
    Runtime,
    Rating,
    Votes,
    MovieAge,
    PopularityScore,
}

impl NumericFeature {
    /// All numeric features, in column order
    pub const ALL: [NumericFeature; 6] = [
        NumericFeature::Year,
        NumericFeature::Runtime,
        NumericFeature::Rating,
        NumericFeature::Votes,
        NumericFeature::MovieAge,
        NumericFeature::PopularityScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericFeature::Year => "year",
            NumericFeature::Runtime => "runtime",
            NumericFeature::Rating => "rating",
            NumericFeature::Votes => "votes",
            NumericFeature::MovieAge => "movie_age",
            NumericFeature::PopularityScore => "popularity_score",
        }
    }

    /// Raw (unscaled) value for a movie, if known
    pub fn extract(&self, movie: &MovieRecord) -> Option<f64> {
        match self {
            NumericFeature::Year => movie.year.map(f64::from),
            NumericFeature::Runtime => movie.runtime,
            NumericFeature::Rating => movie.rating,
            NumericFeature::Votes => movie.votes.map(|v| v as f64),
            NumericFeature::MovieAge => movie.movie_age,
            NumericFeature::PopularityScore => Some(movie.popularity_score),
        }
    }
}

/// Identity and origin of one dense column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    /// Min-max scaled numeric attribute
    Numeric(NumericFeature),
    /// One-hot language indicator; `None` is the unknown-language column
    Language(Option<String>),
    /// Multi-hot genre tag indicator
    Genre(String),
}

impl ColumnKey {
    /// Column name, e.g. "rating_norm", "lang_Telugu", "genre_Action"
    pub fn name(&self) -> String {
        match self {
            ColumnKey::Numeric(feature) => format!("{}_norm", feature.name()),
            ColumnKey::Language(Some(language)) => format!("lang_{language}"),
            ColumnKey::Language(None) => "lang_unknown".to_string(),
            ColumnKey::Genre(tag) => format!("genre_{tag}"),
        }
    }

    pub fn is_language(&self) -> bool {
        matches!(self, ColumnKey::Language(_))
    }

    pub fn is_genre(&self) -> bool {
        matches!(self, ColumnKey::Genre(_))
    }
}

/// A named, tagged column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureColumn {
    pub name: String,
    pub key: ColumnKey,
}

/// Ordered, immutable list of dense feature columns
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
    positions: HashMap<ColumnKey, usize>,
}

impl FeatureSchema {
    /// Build a schema from column keys in their final order.
    ///
    /// A repeated key keeps its first position.
    pub fn new(keys: impl IntoIterator<Item = ColumnKey>) -> Self {
        let mut columns = Vec::new();
        let mut positions = HashMap::new();
        for key in keys {
            if positions.contains_key(&key) {
                continue;
            }
            positions.insert(key.clone(), columns.len());
            columns.push(FeatureColumn {
                name: key.name(),
                key,
            });
        }
        Self { columns, positions }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Column names in order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn position(&self, key: &ColumnKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Positions of every column whose key satisfies `predicate`
    pub fn positions_where(&self, predicate: impl Fn(&ColumnKey) -> bool) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| predicate(&c.key))
            .map(|(i, _)| i)
            .collect()
    }

    /// Lay labelled values out in schema order.
    ///
    /// Schema columns absent from `labelled` are 0.0; labels the schema
    /// doesn't contain are ignored. The output always has `self.len()`
    /// entries.
    pub fn reindex(&self, labelled: &[(ColumnKey, f64)]) -> Vec<f64> {
        let mut values = vec![0.0; self.columns.len()];
        for (key, value) in labelled {
            if let Some(&pos) = self.positions.get(key) {
                values[pos] = *value;
            }
        }
        values
    }

    /// Attach schema labels to a vector laid out in schema order
    pub fn label(&self, values: &[f64]) -> Vec<(ColumnKey, f64)> {
        self.columns
            .iter()
            .zip(values.iter())
            .map(|(column, value)| (column.key.clone(), *value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            ColumnKey::Numeric(NumericFeature::Year),
            ColumnKey::Language(Some("Telugu".to_string())),
            ColumnKey::Language(None),
            ColumnKey::Genre("Action".to_string()),
            ColumnKey::Genre("Drama".to_string()),
        ])
    }

    #[test]
    fn test_column_names() {
        let schema = create_test_schema();
        assert_eq!(
            schema.names(),
            vec!["year_norm", "lang_Telugu", "lang_unknown", "genre_Action", "genre_Drama"]
        );
        assert_eq!(schema.positions_where(ColumnKey::is_language), vec![1, 2]);
        assert_eq!(schema.positions_where(ColumnKey::is_genre), vec![3, 4]);
    }

    #[test]
    fn test_reindex_zero_fills_and_drops_unknown_columns() {
        let schema = create_test_schema();
        let labelled = vec![
            (ColumnKey::Genre("Drama".to_string()), 1.0),
            (ColumnKey::Numeric(NumericFeature::Year), 0.25),
            // Never seen at fit time
            (ColumnKey::Language(Some("Tamil".to_string())), 1.0),
        ];

        assert_eq!(schema.reindex(&labelled), vec![0.25, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_reindex_is_idempotent() {
        let schema = create_test_schema();
        let labelled = vec![
            (ColumnKey::Language(None), 1.0),
            (ColumnKey::Genre("Action".to_string()), 1.0),
            (ColumnKey::Genre("Horror".to_string()), 1.0),
        ];

        let once = schema.reindex(&labelled);
        let twice = schema.reindex(&schema.label(&once));
        assert_eq!(once, twice);
        assert_eq!(twice.len(), schema.len());
    }

    #[test]
    fn test_duplicate_keys_keep_first_position() {
        let schema = FeatureSchema::new(vec![
            ColumnKey::Genre("Action".to_string()),
            ColumnKey::Genre("Action".to_string()),
        ]);
        assert_eq!(schema.len(), 1);
    }
}
