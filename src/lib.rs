//! Content-based book recommendations.
//!
//! The [`engine`] ranks a caller-supplied catalog either by genre overlap
//! with a reading history or by TF-IDF cosine similarity to a search query
//! or to the history's combined text. [`api`] is a thin axum host around it.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::{recommend_by_overlap, recommend_by_similarity, Engine, Strategy};
pub use models::{Catalog, Item, ItemId, Recommendation};
