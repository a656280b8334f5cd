use serde::Serialize;

use super::Item;

/// A catalog item returned by a recommender
///
/// Holds its own copy of the item so the score never leaks back into the
/// caller's catalog. `match_percentage` is `None` for unscored records
/// (genre-overlap results and default listings).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<f64>,
}

impl Recommendation {
    pub fn scored(item: Item, match_percentage: f64) -> Self {
        Self {
            item,
            match_percentage: Some(match_percentage),
        }
    }

    pub fn unscored(item: Item) -> Self {
        Self {
            item,
            match_percentage: None,
        }
    }
}

/// Why a recommender returned a default listing instead of a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Nothing to recommend from
    EmptyCatalog,
    /// No query and no known history
    NoProfile,
    /// The catalog text produced no usable terms
    EmptyVocabulary,
}

/// Output of a single recommendation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    pub fallback: Option<Fallback>,
}

impl RecommendationSet {
    pub fn ranked(recommendations: Vec<Recommendation>) -> Self {
        Self {
            recommendations,
            fallback: None,
        }
    }

    /// Default listing made of the first `count` catalog items, unscored
    pub fn default_listing(catalog: &[Item], count: usize, reason: Fallback) -> Self {
        Self {
            recommendations: catalog
                .iter()
                .take(count)
                .cloned()
                .map(Recommendation::unscored)
                .collect(),
            fallback: Some(reason),
        }
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn ids(&self) -> Vec<super::ItemId> {
        self.recommendations.iter().map(|r| r.item.id).collect()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.recommendations.into_iter().map(|r| r.item).collect()
    }
}
