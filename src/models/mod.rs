pub mod catalog;
pub mod item;
pub mod recommendation;

pub use catalog::{Catalog, Shelf};
pub use item::{Item, ItemId, MATCH_PERCENTAGE_KEY};
pub use recommendation::{Fallback, Recommendation, RecommendationSet};
