//! Content inventory.

use std::collections::{BTreeSet, HashMap};

/// The set of document ids that exist at build time.
///
/// Supplied externally, usually by scanning the content source tree
/// (`docgate-scan`); this crate never reads a filesystem. Each document may
/// carry a set of heading anchors for best-effort fragment validation; a
/// document inserted without anchors has an unknown heading set and its
/// fragments are never judged.
#[derive(Debug, Clone, Default)]
pub struct ContentInventory {
    docs: HashMap<String, Option<BTreeSet<String>>>,
}

impl ContentInventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document id with an unknown heading set.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.docs.insert(id.into(), None);
    }

    /// Add a document id together with its heading anchors.
    pub fn insert_with_anchors<I, S>(&mut self, id: impl Into<String>, anchors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.docs.insert(
            id.into(),
            Some(anchors.into_iter().map(Into::into).collect()),
        );
    }

    /// True if the document id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.docs.contains_key(id)
    }

    /// Heading anchors of a document, if the document exists and its heading
    /// set is known.
    #[must_use]
    pub fn anchors(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.docs.get(id).and_then(Option::as_ref)
    }

    /// Number of documents in the inventory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True if the inventory holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Document ids in sorted order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.docs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for ContentInventory {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut inventory = Self::new();
        for id in iter {
            inventory.insert(id);
        }
        inventory
    }
}
