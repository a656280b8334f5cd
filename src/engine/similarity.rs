use std::collections::HashSet;
use std::sync::Arc;

use super::cache::{FittedCorpus, ModelCache};
use super::document::Corpus;
use super::profile::build_profile;
use super::ranker::rank;
use super::stopwords::StopWords;
use super::{EngineSettings, Recommender};
use crate::error::EngineError;
use crate::models::{Item, ItemId, Recommendation, RecommendationSet};

/// TF-IDF content-similarity recommender
///
/// Each call builds the corpus from the supplied catalog, fits (or fetches
/// from the cache) the term-weighting model, builds a profile from the
/// query or the history, and ranks every item by cosine similarity.
#[derive(Debug, Clone, Default)]
pub struct ContentSimilarityRecommender {
    settings: EngineSettings,
    stop_words: StopWords,
    cache: Option<Arc<ModelCache>>,
}

impl ContentSimilarityRecommender {
    pub fn new(settings: EngineSettings, stop_words: StopWords) -> Self {
        Self {
            settings,
            stop_words,
            cache: None,
        }
    }

    /// Reuses fitted models across calls while the catalog is unchanged
    pub fn with_cache(mut self, cache: Arc<ModelCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    fn fit(&self, corpus: &Corpus<'_>) -> Result<Arc<FittedCorpus>, EngineError> {
        match &self.cache {
            Some(cache) => cache.get_or_fit(corpus.documents(), &self.stop_words),
            None => FittedCorpus::fit(corpus.documents(), &self.stop_words).map(Arc::new),
        }
    }

    fn similarity(
        &self,
        catalog: &[Item],
        history: &HashSet<ItemId>,
        query: Option<&str>,
    ) -> Result<Vec<Recommendation>, EngineError> {
        if catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        let corpus = Corpus::build(catalog);
        let fitted = self.fit(&corpus)?;
        let profile = build_profile(&fitted.model, &corpus, history, query)?;

        let exclude = profile.excludes_history().then_some(history);
        Ok(rank(
            catalog,
            &fitted.matrix,
            profile.vector.view(),
            exclude,
            &self.settings,
        ))
    }
}

impl Recommender for ContentSimilarityRecommender {
    fn recommend(
        &self,
        catalog: &[Item],
        history: &HashSet<ItemId>,
        query: Option<&str>,
    ) -> RecommendationSet {
        match self.similarity(catalog, history, query) {
            Ok(recommendations) => RecommendationSet::ranked(recommendations),
            Err(EngineError::EmptyCatalog) => {
                RecommendationSet::default_listing(catalog, 0, EngineError::EmptyCatalog.into())
            }
            Err(err @ EngineError::EmptyVocabulary) => {
                tracing::warn!(
                    error = %err,
                    items = catalog.len(),
                    count = self.settings.degraded_fallback_count,
                    "Vectorization failed, returning default listing"
                );
                RecommendationSet::default_listing(
                    catalog,
                    self.settings.degraded_fallback_count,
                    err.into(),
                )
            }
            Err(err @ EngineError::NoProfile) => {
                tracing::info!(
                    history = history.len(),
                    count = self.settings.new_user_fallback_count,
                    "No profile, returning default listing"
                );
                RecommendationSet::default_listing(
                    catalog,
                    self.settings.new_user_fallback_count,
                    err.into(),
                )
            }
        }
    }

    fn name(&self) -> &'static str {
        "similarity"
    }
}

/// Content-similarity recommendations with default settings
pub fn recommend_by_similarity(
    catalog: &[Item],
    history: &HashSet<ItemId>,
    query: Option<&str>,
) -> Vec<Recommendation> {
    ContentSimilarityRecommender::default()
        .recommend(catalog, history, query)
        .recommendations
}
