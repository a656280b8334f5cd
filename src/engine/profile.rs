use ndarray::Array1;
use std::collections::HashSet;

use super::document::Corpus;
use super::vectorizer::TfidfModel;
use crate::error::EngineError;
use crate::models::ItemId;

/// What the profile vector was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMode {
    Query,
    History,
}

/// Vector every catalog item is compared against
#[derive(Debug, Clone)]
pub struct Profile {
    pub vector: Array1<f64>,
    pub mode: ProfileMode,
}

impl Profile {
    /// Already-read items are only hidden for history-based profiles
    pub fn excludes_history(&self) -> bool {
        self.mode == ProfileMode::History
    }
}

/// Only a missing or empty query counts as absent
///
/// Whitespace-only text is still a query: it projects to the zero vector
/// and ranks nothing, without hiding the reader's history.
pub fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.filter(|q| !q.is_empty())
}

/// Builds the profile for one request
///
/// A non-blank query wins over history. With history only, the documents
/// of the read items are concatenated and projected as a single text.
pub fn build_profile(
    model: &TfidfModel,
    corpus: &Corpus<'_>,
    history: &HashSet<ItemId>,
    query: Option<&str>,
) -> Result<Profile, EngineError> {
    if let Some(query) = normalize_query(query) {
        return Ok(Profile {
            vector: model.transform(query),
            mode: ProfileMode::Query,
        });
    }

    if history.is_empty() {
        return Err(EngineError::NoProfile);
    }

    let text = corpus.history_text(history).ok_or(EngineError::NoProfile)?;
    Ok(Profile {
        vector: model.transform(&text),
        mode: ProfileMode::History,
    })
}
