use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Unique identifier of a catalog item
pub type ItemId = i64;

/// Key under which recommendations publish their score
pub const MATCH_PERCENTAGE_KEY: &str = "match_percentage";

/// A book in the catalog
///
/// `id` is the only required field. Missing or `null` titles, genres and
/// descriptions fall back to empty values so that a sloppy record still
/// takes part in recommendations. Any other fields (author, cover, year)
/// are carried through untouched, except a previously stored
/// `match_percentage`: scores belong to a recommendation, never to the item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ItemRecord")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(rename = "genre")]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Item as stored in a catalog file
#[derive(Deserialize)]
struct ItemRecord {
    id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(rename = "genre", default, deserialize_with = "null_as_default")]
    genres: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let mut extra = record.extra;
        extra.remove(MATCH_PERCENTAGE_KEY);
        Self {
            id: record.id,
            title: record.title,
            genres: record.genres,
            description: record.description,
            extra,
        }
    }
}

impl Item {
    /// Creates an item without a description
    pub fn new<S: Into<String>>(id: ItemId, title: S, genres: &[&str]) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the item carries the given genre tag (exact match)
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
