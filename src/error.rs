use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::{Fallback, ItemId};

/// Conditions raised inside the recommendation engine
///
/// None of these reach the caller of a recommender: each one is recovered
/// into a [`Fallback`] listing.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("catalog text yields no usable terms")]
    EmptyVocabulary,

    #[error("no search query or known history to build a profile from")]
    NoProfile,
}

impl From<EngineError> for Fallback {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmptyCatalog => Fallback::EmptyCatalog,
            EngineError::EmptyVocabulary => Fallback::EmptyVocabulary,
            EngineError::NoProfile => Fallback::NoProfile,
        }
    }
}

/// Catalog input-contract violations
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog document has no \"books\" array")]
    MissingBooks,

    #[error("Duplicate item id in catalog: {0}")]
    DuplicateId(ItemId),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Catalog(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
