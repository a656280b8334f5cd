//! Recommendation engine
//!
//! Two strategies share one contract: given a catalog, a set of already-read
//! item ids and an optional search query, return a ranked list. Every failure
//! inside a strategy is recovered into a default listing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub mod cache;
pub mod document;
pub mod overlap;
pub mod profile;
pub mod ranker;
pub mod similarity;
pub mod stopwords;
pub mod vectorizer;

pub use cache::ModelCache;
pub use overlap::{recommend_by_overlap, GenreOverlapRecommender};
pub use similarity::{recommend_by_similarity, ContentSimilarityRecommender};
pub use stopwords::StopWords;

use crate::models::{Item, ItemId, RecommendationSet};

/// Minimum match percentage a similarity result must exceed
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 5.0;
/// Maximum number of ranked results
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Default listing size when there is no profile to rank against
pub const DEFAULT_NEW_USER_FALLBACK_COUNT: usize = 10;
/// Default listing size when the catalog text cannot be vectorized
pub const DEFAULT_DEGRADED_FALLBACK_COUNT: usize = 5;
/// Default listing size of the genre-overlap strategy for empty histories
pub const DEFAULT_OVERLAP_COUNT: usize = 5;

/// Tuning knobs shared by both strategies
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub min_match_score: f64,
    pub max_results: usize,
    pub new_user_fallback_count: usize,
    pub degraded_fallback_count: usize,
    pub overlap_default_count: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            max_results: DEFAULT_MAX_RESULTS,
            new_user_fallback_count: DEFAULT_NEW_USER_FALLBACK_COUNT,
            degraded_fallback_count: DEFAULT_DEGRADED_FALLBACK_COUNT,
            overlap_default_count: DEFAULT_OVERLAP_COUNT,
        }
    }
}

/// A recommendation strategy
///
/// Implementations never mutate the catalog; results carry their own copies
/// of the recommended items.
pub trait Recommender: Send + Sync {
    fn recommend(
        &self,
        catalog: &[Item],
        history: &HashSet<ItemId>,
        query: Option<&str>,
    ) -> RecommendationSet;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Strategy selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Overlap,
    #[default]
    Similarity,
}

impl Strategy {
    /// Standalone recommender for this strategy
    pub fn recommender(self, settings: EngineSettings, stop_words: StopWords) -> Box<dyn Recommender> {
        match self {
            Strategy::Overlap => Box::new(GenreOverlapRecommender::new(settings)),
            Strategy::Similarity => Box::new(ContentSimilarityRecommender::new(settings, stop_words)),
        }
    }
}

/// Both strategies configured with the same settings
#[derive(Debug, Clone, Default)]
pub struct Engine {
    settings: EngineSettings,
    overlap: GenreOverlapRecommender,
    similarity: ContentSimilarityRecommender,
}

impl Engine {
    pub fn new(settings: EngineSettings, stop_words: StopWords) -> Self {
        Self {
            overlap: GenreOverlapRecommender::new(settings.clone()),
            similarity: ContentSimilarityRecommender::new(settings.clone(), stop_words),
            settings,
        }
    }

    /// Shares fitted similarity models through `cache`
    pub fn with_model_cache(mut self, cache: Arc<ModelCache>) -> Self {
        self.similarity = self.similarity.with_cache(cache);
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn recommender(&self, strategy: Strategy) -> &dyn Recommender {
        match strategy {
            Strategy::Overlap => &self.overlap,
            Strategy::Similarity => &self.similarity,
        }
    }

    pub fn recommend(
        &self,
        strategy: Strategy,
        catalog: &[Item],
        history: &HashSet<ItemId>,
        query: Option<&str>,
    ) -> RecommendationSet {
        let recommender = self.recommender(strategy);
        let result = recommender.recommend(catalog, history, query);

        tracing::debug!(
            strategy = recommender.name(),
            items = catalog.len(),
            history = history.len(),
            has_query = profile::normalize_query(query).is_some(),
            returned = result.len(),
            fallback = ?result.fallback,
            "Recommendation computed"
        );

        result
    }
}
