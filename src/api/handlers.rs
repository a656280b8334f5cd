use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;

use crate::engine::Strategy;
use crate::error::{AppError, AppResult};
use crate::models::{Fallback, Item, ItemId, Recommendation, RecommendationSet, Shelf};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct BookFilter {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub strategy: Strategy,
    pub history_ids: Option<Vec<ItemId>>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub strategy: Strategy,
    pub fallback: Option<Fallback>,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResponse {
    fn new(strategy: Strategy, set: RecommendationSet) -> Self {
        Self {
            strategy,
            fallback: set.fallback,
            recommendations: set.recommendations,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the catalog, optionally restricted to one genre
pub async fn list_books(
    State(state): State<AppState>,
    Query(filter): Query<BookFilter>,
) -> Json<Vec<Item>> {
    let books = match filter.genre {
        Some(genre) => state.catalog.by_genre(&genre),
        None => state.catalog.items().to_vec(),
    };
    Json(books)
}

/// Get a single book
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<Item>> {
    state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
}

/// Catalog grouped by genre
pub async fn list_shelves(State(state): State<AppState>) -> Json<Vec<Shelf>> {
    Json(state.catalog.shelves())
}

/// Recommend books from a reading history or a query
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    let history: HashSet<ItemId> = match request.history_ids {
        Some(ids) => ids.into_iter().collect(),
        None => state.default_history.as_ref().clone(),
    };

    tracing::info!(
        strategy = ?request.strategy,
        history_count = history.len(),
        has_query = request.query.is_some(),
        "Processing recommendation request"
    );

    let set = state.engine.recommend(
        request.strategy,
        state.catalog.items(),
        &history,
        request.query.as_deref(),
    );

    Json(RecommendationResponse::new(request.strategy, set))
}

/// Search the catalog by content similarity to `q`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query must not be empty".to_string(),
        ));
    }

    tracing::info!(query, "Processing search request");

    let set = state.engine.recommend(
        Strategy::Similarity,
        state.catalog.items(),
        &HashSet::new(),
        Some(query),
    );

    Ok(Json(RecommendationResponse::new(Strategy::Similarity, set)))
}
