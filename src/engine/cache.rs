use ndarray::Array2;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use super::stopwords::StopWords;
use super::vectorizer::TfidfModel;
use crate::error::EngineError;

/// A fitted model together with its document matrix
#[derive(Debug, Clone)]
pub struct FittedCorpus {
    pub model: TfidfModel,
    pub matrix: Array2<f64>,
}

impl FittedCorpus {
    pub fn fit(documents: &[String], stop_words: &StopWords) -> Result<Self, EngineError> {
        let (model, matrix) = TfidfModel::fit_transform(documents, stop_words.clone())?;
        Ok(Self { model, matrix })
    }
}

/// Fingerprint of a corpus: its documents, in order, plus the stop words
pub fn fingerprint(documents: &[String], stop_words: &StopWords) -> u64 {
    let mut hasher = DefaultHasher::new();
    documents.hash(&mut hasher);
    stop_words.sorted().hash(&mut hasher);
    hasher.finish()
}

/// Single-slot cache of the most recently fitted corpus
///
/// A lookup with a different fingerprint refits and replaces the slot, so
/// a changed catalog never sees a stale model. Failed fits are not cached.
#[derive(Debug, Default)]
pub struct ModelCache {
    slot: RwLock<Option<(u64, Arc<FittedCorpus>)>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_fit(
        &self,
        documents: &[String],
        stop_words: &StopWords,
    ) -> Result<Arc<FittedCorpus>, EngineError> {
        let key = fingerprint(documents, stop_words);

        if let Some(fitted) = self.lookup(key) {
            tracing::debug!(fingerprint = key, "Model cache hit");
            return Ok(fitted);
        }

        tracing::debug!(fingerprint = key, "Model cache miss");
        let fitted = Arc::new(FittedCorpus::fit(documents, stop_words)?);

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some((key, fitted.clone()));

        Ok(fitted)
    }

    pub fn contains(&self, documents: &[String], stop_words: &StopWords) -> bool {
        self.lookup(fingerprint(documents, stop_words)).is_some()
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    fn lookup(&self, key: u64) -> Option<Arc<FittedCorpus>> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|(cached, _)| *cached == key)
            .map(|(_, fitted)| fitted.clone())
    }
}
