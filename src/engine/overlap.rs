use std::collections::HashSet;

use super::{EngineSettings, Recommender};
use crate::models::{Fallback, Item, ItemId, Recommendation, RecommendationSet};

/// Recommends unread items sharing at least one genre with the history
#[derive(Debug, Clone, Default)]
pub struct GenreOverlapRecommender {
    settings: EngineSettings,
}

impl GenreOverlapRecommender {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    fn overlap(&self, catalog: &[Item], history: &HashSet<ItemId>) -> RecommendationSet {
        if catalog.is_empty() {
            return RecommendationSet::default_listing(catalog, 0, Fallback::EmptyCatalog);
        }

        if history.is_empty() {
            tracing::info!(
                count = self.settings.overlap_default_count,
                "No history, returning default listing"
            );
            return RecommendationSet::default_listing(
                catalog,
                self.settings.overlap_default_count,
                Fallback::NoProfile,
            );
        }

        let liked_genres: HashSet<&str> = catalog
            .iter()
            .filter(|item| history.contains(&item.id))
            .flat_map(|item| item.genres.iter().map(String::as_str))
            .collect();

        let recommendations: Vec<Recommendation> = catalog
            .iter()
            .filter(|item| !history.contains(&item.id))
            .filter(|item| item.genres.iter().any(|g| liked_genres.contains(g.as_str())))
            .take(self.settings.max_results)
            .cloned()
            .map(Recommendation::unscored)
            .collect();

        tracing::debug!(
            liked_genres = liked_genres.len(),
            returned = recommendations.len(),
            "Genre overlap completed"
        );

        RecommendationSet::ranked(recommendations)
    }
}

impl Recommender for GenreOverlapRecommender {
    fn recommend(
        &self,
        catalog: &[Item],
        history: &HashSet<ItemId>,
        _query: Option<&str>,
    ) -> RecommendationSet {
        self.overlap(catalog, history)
    }

    fn name(&self) -> &'static str {
        "overlap"
    }
}

/// Genre-overlap recommendations with default settings
pub fn recommend_by_overlap(history: &HashSet<ItemId>, catalog: &[Item]) -> Vec<Item> {
    GenreOverlapRecommender::default()
        .overlap(catalog, history)
        .into_items()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Item> {
        vec![
            Item::new(1, "Dune", &["SciFi"]),
            Item::new(2, "Foundation", &["SciFi"]),
            Item::new(3, "Pride and Prejudice", &["Classic"]),
            Item::new(4, "Frankenstein", &["Classic", "SciFi"]),
            Item::new(5, "Untagged", &[]),
            Item::new(6, "Emma", &["Classic"]),
        ]
    }

    fn history(ids: &[ItemId]) -> HashSet<ItemId> {
        ids.iter().copied().collect()
    }

    fn ids(items: &[Item]) -> Vec<ItemId> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_empty_history_returns_first_five() {
        let result = recommend_by_overlap(&HashSet::new(), &catalog());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shared_genre_unread_items() {
        let result = recommend_by_overlap(&history(&[1]), &catalog());
        assert_eq!(ids(&result), vec![2, 4]);
    }

    #[test]
    fn test_union_of_history_genres() {
        let result = recommend_by_overlap(&history(&[1, 3]), &catalog());
        assert_eq!(ids(&result), vec![2, 4, 6]);
    }

    #[test]
    fn test_unknown_history_yields_nothing() {
        let result = recommend_by_overlap(&history(&[99]), &catalog());
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let result = recommend_by_overlap(&history(&[1]), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_truncates_to_max_results() {
        let mut catalog: Vec<Item> = (1..=20).map(|id| Item::new(id, "t", &["SciFi"])).collect();
        catalog.push(Item::new(21, "t", &["Classic"]));
        let result = recommend_by_overlap(&history(&[1]), &catalog);
        assert_eq!(result.len(), 10);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_custom_default_count() {
        let recommender = GenreOverlapRecommender::new(EngineSettings {
            overlap_default_count: 2,
            ..EngineSettings::default()
        });
        let set = recommender.recommend(&catalog(), &HashSet::new(), None);
        assert_eq!(set.ids(), vec![1, 2]);
        assert_eq!(set.fallback, Some(Fallback::NoProfile));
    }
}
