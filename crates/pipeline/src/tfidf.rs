//! TF-IDF vectorizer for the content feature space.
//!
//! ## Algorithm
//! 1. Tokenize: lowercase runs of two or more word characters, stop words removed
//! 2. Vocabulary: the `max_features` most frequent terms over the corpus
//!    (ties alphabetical), column indices assigned alphabetically
//! 3. Weight: raw term count × smooth idf `ln((1 + n) / (1 + df)) + 1`
//! 4. L2-normalize every row

use crate::error::{FeatureError, Result};
use crate::stopwords;
use sources::SparseVector;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
    stop_words: Option<&'static HashSet<&'static str>>,
    /// term -> column
    vocabulary: BTreeMap<String, usize>,
    /// idf per column
    idf: Vec<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// Unfitted vectorizer with no vocabulary cap and no stop words
    pub fn new() -> Self {
        Self {
            max_features: None,
            stop_words: None,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    /// Keep only the `n` most frequent terms
    pub fn with_max_features(mut self, n: usize) -> Self {
        self.max_features = Some(n);
        self
    }

    pub fn with_stop_words_english(mut self) -> Self {
        self.stop_words = Some(stopwords::english());
        self
    }

    /// Split a document into lowercase terms, stop words removed
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        document
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .map(str::to_lowercase)
            .filter(|token| {
                self.stop_words
                    .is_none_or(|words| !words.contains(token.as_str()))
            })
            .collect()
    }

    /// Learn vocabulary and idf weights from the corpus
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.tokenize(d)).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokenized.iter().flatten() {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        if counts.is_empty() {
            return Err(FeatureError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        if let Some(cap) = self.max_features {
            ranked.truncate(cap);
        }

        let mut terms: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect();

        let mut df = vec![0usize; self.vocabulary.len()];
        for tokens in &tokenized {
            let seen: HashSet<usize> = tokens
                .iter()
                .filter_map(|t| self.vocabulary.get(t).copied())
                .collect();
            for column in seen {
                df[column] += 1;
            }
        }

        let n = documents.len() as f64;
        self.idf = df
            .into_iter()
            .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        Ok(())
    }

    /// Weighted, L2-normalized vector for one document over the fitted vocabulary.
    ///
    /// Terms outside the vocabulary are ignored; an unfitted vectorizer
    /// yields zero-dimensional vectors.
    pub fn transform(&self, document: &str) -> SparseVector {
        let pairs = self
            .tokenize(document)
            .into_iter()
            .filter_map(|token| self.vocabulary.get(&token).copied())
            .map(|column| (column, self.idf[column]));

        let mut vector = SparseVector::from_pairs(self.idf.len(), pairs);
        vector.l2_normalize();
        vector
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        Ok(documents.iter().map(|d| self.transform(d)).collect())
    }

    /// Fitted terms and their columns, alphabetical
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CosineVector;

    fn corpus() -> Vec<String> {
        vec![
            "Action, Comedy, Fantasy Telugu".to_string(),
            "Action, Drama Telugu".to_string(),
            "Action, Crime Kannada".to_string(),
        ]
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let vectorizer = TfidfVectorizer::new().with_stop_words_english();
        assert_eq!(
            vectorizer.tokenize("The Action and a Sci-Fi x"),
            vec!["action", "sci", "fi"]
        );
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let mut vectorizer = TfidfVectorizer::new().with_stop_words_english();
        vectorizer.fit(&corpus()).unwrap();
        let terms: Vec<&str> = vectorizer.vocabulary().keys().map(String::as_str).collect();
        assert_eq!(
            terms,
            vec!["action", "comedy", "crime", "drama", "fantasy", "kannada", "telugu"]
        );
        assert_eq!(vectorizer.vocabulary()["action"], 0);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = TfidfVectorizer::new().with_max_features(2);
        vectorizer.fit(&corpus()).unwrap();
        let terms: Vec<&str> = vectorizer.vocabulary().keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["action", "telugu"]);
    }

    #[test]
    fn test_smooth_idf() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();
        let action = vectorizer.vocabulary()["action"];
        let kannada = vectorizer.vocabulary()["kannada"];
        assert!((vectorizer.idf()[action] - 1.0).abs() < 1e-12);
        assert!((vectorizer.idf()[kannada] - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_rows_are_unit_length() {
        let mut vectorizer = TfidfVectorizer::new().with_stop_words_english();
        let rows = vectorizer.fit_transform(&corpus()).unwrap();
        for row in &rows {
            assert!((row.norm() - 1.0).abs() < 1e-12);
        }
        assert_eq!(vectorizer.transform("Horror Marathi").nnz(), 0);
    }

    #[test]
    fn test_empty_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new().with_stop_words_english();
        let err = vectorizer
            .fit(&["the and".to_string(), String::new()])
            .unwrap_err();
        assert_eq!(err, FeatureError::EmptyVocabulary);
    }
}
