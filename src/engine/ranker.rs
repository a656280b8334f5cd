use ndarray::{Array2, ArrayView1, Axis};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::EngineSettings;
use crate::models::{Item, ItemId, Recommendation};

/// Cosine of the angle between `a` and `b`; 0 when either is all zeros
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    a.dot(&b) / (norm_a * norm_b)
}

/// Similarity in [0, 1] as a percentage with one decimal place
pub fn to_match_percentage(similarity: f64) -> f64 {
    (similarity * 1000.0).round() / 10.0
}

/// Ranks every item of `items` against `profile`
///
/// `documents` holds one row per item, in the same order. Items in
/// `exclude` are skipped, scores must be strictly above
/// `settings.min_match_score`, and at most `settings.max_results` records
/// come back. Equal scores keep catalog order.
pub fn rank(
    items: &[Item],
    documents: &Array2<f64>,
    profile: ArrayView1<'_, f64>,
    exclude: Option<&HashSet<ItemId>>,
    settings: &EngineSettings,
) -> Vec<Recommendation> {
    let mut scored: Vec<(usize, f64)> = documents
        .axis_iter(Axis(0))
        .map(|row| to_match_percentage(cosine_similarity(profile, row)))
        .enumerate()
        .collect();

    // stable: ties stay in catalog order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let ranked: Vec<Recommendation> = scored
        .into_iter()
        .filter_map(|(index, score)| items.get(index).map(|item| (item, score)))
        .filter(|(item, _)| exclude.map_or(true, |ids| !ids.contains(&item.id)))
        .filter(|(_, score)| *score > settings.min_match_score)
        .take(settings.max_results)
        .map(|(item, score)| Recommendation::scored(item.clone(), score))
        .collect();

    tracing::debug!(
        candidates = items.len(),
        returned = ranked.len(),
        "Ranking completed"
    );

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn items(n: i64) -> Vec<Item> {
        (1..=n).map(|id| Item::new(id, format!("item {id}"), &[])).collect()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = arr1(&[1.0, 0.0, 0.0]);
        let b = arr1(&[1.0, 0.0, 0.0]);
        assert!((cosine_similarity(a.view(), b.view()) - 1.0).abs() < 1e-9);

        let c = arr1(&[0.0, 1.0, 0.0]);
        assert!(cosine_similarity(a.view(), c.view()).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = arr1(&[0.0, 0.0]);
        let b = arr1(&[0.3, 0.4]);
        assert_eq!(cosine_similarity(a.view(), b.view()), 0.0);
        assert_eq!(cosine_similarity(b.view(), a.view()), 0.0);
    }

    #[test]
    fn test_match_percentage_rounding() {
        assert_eq!(to_match_percentage(0.12345), 12.3);
        assert_eq!(to_match_percentage(0.1236), 12.4);
        assert_eq!(to_match_percentage(1.0), 100.0);
        assert_eq!(to_match_percentage(0.0), 0.0);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let items = items(3);
        let documents = arr2(&[[0.0, 1.0], [1.0, 0.0], [0.6, 0.8]]);
        let profile = arr1(&[1.0, 0.0]);

        let ranked = rank(&items, &documents, profile.view(), None, &EngineSettings::default());
        let ids: Vec<ItemId> = ranked.iter().map(|r| r.item.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(ranked[0].match_percentage, Some(100.0));
        assert_eq!(ranked[1].match_percentage, Some(60.0));
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let items = items(4);
        let documents = arr2(&[[0.6, 0.8], [1.0, 0.0], [0.6, 0.8], [1.0, 0.0]]);
        let profile = arr1(&[1.0, 0.0]);

        let ranked = rank(&items, &documents, profile.view(), None, &EngineSettings::default());
        let ids: Vec<ItemId> = ranked.iter().map(|r| r.item.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_rank_threshold_is_strict() {
        let items = items(2);
        // cos = 0.05 -> exactly 5.0%, filtered out
        let documents = arr2(&[[0.05, (1.0f64 - 0.0025).sqrt()], [0.051, (1.0f64 - 0.002601).sqrt()]]);
        let profile = arr1(&[1.0, 0.0]);

        let ranked = rank(&items, &documents, profile.view(), None, &EngineSettings::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, 2);
        assert_eq!(ranked[0].match_percentage, Some(5.1));
    }

    #[test]
    fn test_rank_excludes_history() {
        let items = items(2);
        let documents = arr2(&[[1.0, 0.0], [0.8, 0.6]]);
        let profile = arr1(&[1.0, 0.0]);
        let history: HashSet<ItemId> = [1].into_iter().collect();

        let ranked = rank(
            &items,
            &documents,
            profile.view(),
            Some(&history),
            &EngineSettings::default(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, 2);
    }

    #[test]
    fn test_rank_truncates_to_max_results() {
        let items = items(15);
        let documents = Array2::from_elem((15, 1), 1.0);
        let profile = arr1(&[1.0]);

        let ranked = rank(&items, &documents, profile.view(), None, &EngineSettings::default());
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].item.id, 1);
        assert_eq!(ranked[9].item.id, 10);
    }

    #[test]
    fn test_rank_respects_custom_settings() {
        let items = items(3);
        let documents = arr2(&[[1.0, 0.0], [0.8, 0.6], [0.0, 1.0]]);
        let profile = arr1(&[1.0, 0.0]);
        let settings = EngineSettings {
            min_match_score: 90.0,
            ..EngineSettings::default()
        };

        let ranked = rank(&items, &documents, profile.view(), None, &settings);
        assert_eq!(ranked.len(), 1);
    }
}
