use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use super::{Item, ItemId};
use crate::error::CatalogError;

/// In-memory, ordered collection of catalog items
///
/// Order is significant: default listings, tie-breaking and genre-overlap
/// output all follow catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
}

/// Items grouped under one genre
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Shelf {
    pub genre: String,
    pub items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate item identifiers
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Parses a catalog from JSON
    ///
    /// Accepts either a bare array of items or a document of the form
    /// `{"books": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        let items = match value {
            Value::Object(mut document) => document
                .remove("books")
                .ok_or(CatalogError::MissingBooks)?,
            other => other,
        };
        let items: Vec<Item> = serde_json::from_value(items)?;
        Self::new(items)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            items = catalog.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items tagged with `genre`, in catalog order
    pub fn by_genre(&self, genre: &str) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| item.has_genre(genre))
            .cloned()
            .collect()
    }

    /// One shelf per genre, genres in order of first appearance
    pub fn shelves(&self) -> Vec<Shelf> {
        let mut shelves: Vec<Shelf> = Vec::new();
        for item in &self.items {
            for genre in &item.genres {
                match shelves.iter().position(|shelf| &shelf.genre == genre) {
                    Some(index) => {
                        let shelf = &mut shelves[index];
                        if shelf.items.last().map(|last| last.id) != Some(item.id) {
                            shelf.items.push(item.clone());
                        }
                    }
                    None => shelves.push(Shelf {
                        genre: genre.clone(),
                        items: vec![item.clone()],
                    }),
                }
            }
        }
        shelves
    }
}
