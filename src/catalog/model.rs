use std::collections::HashMap;

use crate::library::TrackId;

/// Bidirectional `TrackId` / title mapping.
#[derive(Debug, Clone, Default)]
pub struct TitleCatalog {
    titles: HashMap<TrackId, String>,
    /// Identifiers in the order they were first registered.
    order: Vec<TrackId>,
    /// Title -> identifier, first-registered identifier wins.
    reverse: HashMap<String, TrackId>,
}

impl TitleCatalog {
    /// Register `title` for `id`. A repeated identifier keeps its original
    /// registration slot but takes the new title.
    pub(super) fn insert(&mut self, id: TrackId, title: String) {
        if self.titles.insert(id.clone(), title).is_none() {
            self.order.push(id);
        }
    }

    /// Rebuild the reverse index after a batch of inserts.
    pub(super) fn index(&mut self) {
        self.reverse.clear();
        for id in &self.order {
            if let Some(title) = self.titles.get(id) {
                self.reverse
                    .entry(title.clone())
                    .or_insert_with(|| id.clone());
            }
        }
    }

    /// Display title for `id`; the identifier itself when unmapped.
    pub fn title_for<'a>(&'a self, id: &'a TrackId) -> &'a str {
        self.titles
            .get(id)
            .map(String::as_str)
            .unwrap_or_else(|| id.as_str())
    }

    /// Identifier displayed as `title`.
    ///
    /// An unmapped title is taken to be an identifier. When several
    /// identifiers share a title, the one registered first wins.
    pub fn id_for_title(&self, title: &str) -> TrackId {
        self.reverse
            .get(title)
            .cloned()
            .unwrap_or_else(|| TrackId::from(title))
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
