//! TF-IDF term weighting.
//!
//! ```text
//! tfidf(t, d) = tf(t, d) * idf(t)
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! `tf` is the raw term count, `n` the number of documents and `df(t)` the
//! number of documents containing `t`. Every vector is L2-normalised.
//! Vocabulary columns are assigned in lexicographic term order.

use ndarray::{Array1, Array2, ArrayViewMut1, Axis};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::stopwords::StopWords;
use crate::error::EngineError;

/// Unicode word runs of two or more characters
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Lower-cased terms of `text`, stop words removed
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !stop_words.contains(term))
        .map(str::to_string)
        .collect()
}

/// Vocabulary and IDF weights fitted on one corpus
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    idf: Array1<f64>,
    stop_words: StopWords,
}

impl TfidfModel {
    /// Learns the vocabulary and IDF weights from `documents`
    pub fn fit<S: AsRef<str>>(documents: &[S], stop_words: StopWords) -> Result<Self, EngineError> {
        let tokenized = Self::tokenize_all(documents, &stop_words);
        Self::fit_tokens(&tokenized, stop_words)
    }

    /// Fits the model and returns it together with the document matrix
    /// (one row per document, in input order)
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        stop_words: StopWords,
    ) -> Result<(Self, Array2<f64>), EngineError> {
        let tokenized = Self::tokenize_all(documents, &stop_words);
        let model = Self::fit_tokens(&tokenized, stop_words)?;

        let mut matrix = Array2::zeros((tokenized.len(), model.vocabulary_size()));
        for (row, tokens) in matrix.axis_iter_mut(Axis(0)).zip(&tokenized) {
            model.weigh(tokens, row);
        }

        tracing::debug!(
            documents = tokenized.len(),
            vocabulary = model.vocabulary_size(),
            "TF-IDF model fitted"
        );

        Ok((model, matrix))
    }

    /// Projects unseen text into the fitted space
    ///
    /// Terms outside the vocabulary are dropped; text without any known
    /// term yields the zero vector.
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let tokens = tokenize(text, &self.stop_words);
        let mut vector = Array1::zeros(self.vocabulary_size());
        self.weigh(&tokens, vector.view_mut());
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of `term`, if it is in the vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|column| self.idf[column])
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    fn tokenize_all<S: AsRef<str>>(documents: &[S], stop_words: &StopWords) -> Vec<Vec<String>> {
        documents
            .iter()
            .map(|doc| tokenize(doc.as_ref(), stop_words))
            .collect()
    }

    fn fit_tokens(tokenized: &[Vec<String>], stop_words: StopWords) -> Result<Self, EngineError> {
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(EngineError::EmptyVocabulary);
        }

        let n_docs = tokenized.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Array1::zeros(doc_freq.len());

        for (column, (term, df)) in doc_freq.into_iter().enumerate() {
            idf[column] = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;
            vocabulary.insert(term.to_string(), column);
        }

        Ok(Self {
            vocabulary,
            idf,
            stop_words,
        })
    }

    /// Writes the normalised TF-IDF weights of `tokens` into `row`
    fn weigh(&self, tokens: &[String], mut row: ArrayViewMut1<f64>) {
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                row[column] += 1.0;
            }
        }

        row.zip_mut_with(&self.idf, |weight, idf| *weight *= idf);

        let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            row /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "Dune SciFi desert planet giant worms",
            "Foundation SciFi galactic empire psychohistory",
            "Pride and Prejudice Classic regency romance manners",
        ]
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        let tokens = tokenize("El Señor de los Anillos, y la Comunidad", &StopWords::spanish());
        assert_eq!(tokens, vec!["señor", "anillos", "comunidad"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        let tokens = tokenize("a b cd e-f gh!", &StopWords::new(Vec::<&str>::new()));
        assert_eq!(tokens, vec!["cd", "gh"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let model = TfidfModel::fit(&["zeta alpha", "mid"], StopWords::default()).unwrap();
        assert_eq!(model.vocabulary_size(), 3);
        assert_eq!(model.column("alpha"), Some(0));
        assert_eq!(model.column("mid"), Some(1));
        assert_eq!(model.column("zeta"), Some(2));
    }

    #[test]
    fn test_smoothed_idf() {
        let model = TfidfModel::fit(&corpus(), StopWords::default()).unwrap();
        // "scifi" is in 2 of 3 documents, "dune" in 1 of 3
        let expected_common = (4.0f64 / 3.0).ln() + 1.0;
        let expected_rare = (4.0f64 / 2.0).ln() + 1.0;
        assert!((model.idf("scifi").unwrap() - expected_common).abs() < 1e-12);
        assert!((model.idf("dune").unwrap() - expected_rare).abs() < 1e-12);
    }

    #[test]
    fn test_document_rows_are_unit_length() {
        let (_, matrix) = TfidfModel::fit_transform(&corpus(), StopWords::default()).unwrap();
        assert_eq!(matrix.nrows(), 3);
        for row in matrix.axis_iter(Axis(0)) {
            assert!((row.dot(&row).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_vocabulary() {
        let result = TfidfModel::fit(&["", "de la y", "  "], StopWords::spanish());
        assert!(matches!(result, Err(EngineError::EmptyVocabulary)));
    }

    #[test]
    fn test_empty_corpus_has_empty_vocabulary() {
        let documents: Vec<String> = Vec::new();
        let result = TfidfModel::fit_transform(&documents, StopWords::spanish());
        assert!(matches!(result, Err(EngineError::EmptyVocabulary)));
    }

    #[test]
    fn test_transform_drops_unknown_terms() {
        let model = TfidfModel::fit(&corpus(), StopWords::default()).unwrap();
        let vector = model.transform("dragons and wizards");
        assert_eq!(vector.len(), model.vocabulary_size());
        // "and" is known from the Pride and Prejudice document
        let column = model.column("and").unwrap();
        assert!((vector[column] - 1.0).abs() < 1e-12);
        assert_eq!(vector.iter().filter(|w| **w != 0.0).count(), 1);
    }

    #[test]
    fn test_transform_of_unknown_text_is_zero() {
        let model = TfidfModel::fit(&corpus(), StopWords::default()).unwrap();
        let vector = model.transform("dragones fuego");
        assert!(vector.iter().all(|w| *w == 0.0));
    }

    #[test]
    fn test_transform_matches_fitted_row() {
        let (model, matrix) = TfidfModel::fit_transform(&corpus(), StopWords::default()).unwrap();
        let vector = model.transform(corpus()[1]);
        for (a, b) in vector.iter().zip(matrix.row(1).iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
