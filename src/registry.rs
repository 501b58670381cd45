//! The ordered catalog of documents known to a gallery session.
//!
//! Ordering: newest uploads first, with the preloaded documents forming the
//! tail that was prepended once at startup. Inserting `D1` then `D2` into a
//! registry hydrated with `[A, B]` yields `[D2, D1, A, B]`.
//!
//! The registry is mutated only by [`Registry::hydrate`] (once) and
//! [`Registry::insert`] (many times). There is no removal.

use crate::types::{Document, DocumentId, PreloadedDocument};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry was already hydrated with preloaded documents")]
    AlreadyHydrated,
}

#[derive(Debug, Default)]
pub struct Registry {
    documents: Vec<Document>,
    hydrated: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend the host-supplied documents, in input order.
    ///
    /// Acquire-once: a second call fails and leaves the registry untouched,
    /// even if the first call received an empty list.
    pub fn hydrate(
        &mut self,
        descriptors: impl IntoIterator<Item = PreloadedDocument>,
    ) -> Result<usize, RegistryError> {
        if self.hydrated {
            return Err(RegistryError::AlreadyHydrated);
        }
        self.hydrated = true;

        let preloaded: Vec<Document> = descriptors.into_iter().map(Document::preloaded).collect();
        let added = preloaded.len();
        self.documents.splice(0..0, preloaded);
        Ok(added)
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Insert at the front (most-recent-first).
    pub fn insert(&mut self, document: Document) {
        debug_assert!(
            self.get(document.id).is_none(),
            "document ids must be unique"
        );
        self.documents.insert(0, document);
    }

    /// Documents whose name contains `needle`, ignoring case.
    ///
    /// The returned [`Query`] is lazy and can be iterated any number of
    /// times; each pass walks the registry afresh in registry order.
    pub fn query(&self, needle: &str) -> Query<'_> {
        Query {
            documents: &self.documents,
            needle: needle.to_lowercase(),
        }
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// An owned copy of the current ordering, for rendering.
    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.clone()
    }
}

/// A restartable, case-insensitive name filter over a [`Registry`].
#[derive(Debug, Clone)]
pub struct Query<'a> {
    documents: &'a [Document],
    needle: String,
}

impl<'a> Query<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Document> + '_ {
        self.documents
            .iter()
            .filter(move |d| d.name.to_lowercase().contains(&self.needle))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Collect the matches into an owned list, in registry order.
    pub fn to_vec(&self) -> Vec<Document> {
        self.iter().cloned().collect()
    }
}

impl<'q, 'a> IntoIterator for &'q Query<'a> {
    type Item = &'a Document;
    type IntoIter = Box<dyn Iterator<Item = &'a Document> + 'q>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
