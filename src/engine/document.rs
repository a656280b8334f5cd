use std::collections::HashSet;

use crate::models::{Item, ItemId};

/// Text an item is compared by: title, then genres, then description
pub fn build_document(item: &Item) -> String {
    format!(
        "{} {} {}",
        item.title,
        item.genres.join(" "),
        item.description.as_deref().unwrap_or("")
    )
}

/// Catalog items paired with their documents, in catalog order
#[derive(Debug, Clone)]
pub struct Corpus<'a> {
    items: &'a [Item],
    documents: Vec<String>,
}

impl<'a> Corpus<'a> {
    pub fn build(items: &'a [Item]) -> Self {
        Self {
            items,
            documents: items.iter().map(build_document).collect(),
        }
    }

    pub fn items(&self) -> &'a [Item] {
        self.items
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Space-joined documents of the items whose id is in `history`
    ///
    /// Returns `None` when none of the history ids is in the catalog.
    pub fn history_text(&self, history: &HashSet<ItemId>) -> Option<String> {
        let read: Vec<&str> = self
            .items
            .iter()
            .zip(&self.documents)
            .filter(|(item, _)| history.contains(&item.id))
            .map(|(_, document)| document.as_str())
            .collect();

        if read.is_empty() {
            None
        } else {
            Some(read.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_concatenates_fields() {
        let item = Item::new(1, "Dune", &["SciFi", "Adventure"])
            .with_description("desert planet giant worms");
        assert_eq!(
            build_document(&item),
            "Dune SciFi Adventure desert planet giant worms"
        );
    }

    #[test]
    fn test_document_without_description() {
        let item = Item::new(1, "Dune", &["SciFi"]);
        assert_eq!(build_document(&item), "Dune SciFi ");
    }

    #[test]
    fn test_document_for_empty_item() {
        let item = Item::new(1, "", &[]);
        assert_eq!(build_document(&item), "  ");
    }

    #[test]
    fn test_history_text_in_catalog_order() {
        let items = vec![
            Item::new(1, "Dune", &["SciFi"]),
            Item::new(2, "Emma", &["Classic"]),
            Item::new(3, "Solaris", &["SciFi"]),
        ];
        let corpus = Corpus::build(&items);
        let history: HashSet<ItemId> = [3, 1].into_iter().collect();
        assert_eq!(
            corpus.history_text(&history).as_deref(),
            Some("Dune SciFi  Solaris SciFi ")
        );
    }

    #[test]
    fn test_history_text_unknown_ids() {
        let items = vec![Item::new(1, "Dune", &["SciFi"])];
        let corpus = Corpus::build(&items);
        let history: HashSet<ItemId> = [42].into_iter().collect();
        assert_eq!(corpus.history_text(&history), None);
    }
}
