//! Both feature spaces, fitted together from one table.

use crate::error::Result;
use crate::features::FeatureEngineer;
use crate::tfidf::TfidfVectorizer;
use data_loader::MovieTable;
use sources::SparseVector;
use tracing::info;

/// Vocabulary cap for the content space
pub const MAX_TEXT_FEATURES: usize = 100;

/// Fitted transformers plus the per-movie rows of each space.
///
/// Row `i` of both `dense` and `sparse` is movie id `i`.
#[derive(Debug, Clone)]
pub struct FeatureSpaces {
    pub engineer: FeatureEngineer,
    pub vectorizer: TfidfVectorizer,
    pub dense: Vec<Vec<f64>>,
    pub sparse: Vec<SparseVector>,
}

impl FeatureSpaces {
    pub fn fit(table: &MovieTable) -> Result<Self> {
        let engineer = FeatureEngineer::fit(table.movies())?;
        let dense = engineer.transform_all(table.movies());

        let documents: Vec<String> = table.movies().iter().map(|m| m.content_text()).collect();
        let mut vectorizer = TfidfVectorizer::new()
            .with_max_features(MAX_TEXT_FEATURES)
            .with_stop_words_english();
        let sparse = vectorizer.fit_transform(&documents)?;

        info!(
            "Feature spaces ready: {} movies, {} dense columns, {} text terms",
            dense.len(),
            engineer.schema().len(),
            vectorizer.vocabulary().len()
        );

        Ok(Self {
            engineer,
            vectorizer,
            dense,
            sparse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_fallback_spaces() {
        let table = MovieTable::fallback(2024);
        let spaces = FeatureSpaces::fit(&table).unwrap();

        assert_eq!(spaces.dense.len(), 5);
        assert_eq!(spaces.sparse.len(), 5);
        assert!(spaces.dense.iter().all(|row| row.len() == spaces.engineer.schema().len()));
        // action comedy crime drama fantasy kannada romance telugu
        assert_eq!(spaces.vectorizer.vocabulary().len(), 8);
    }
}
