//! Transient resource handles for uploaded file bytes.
//!
//! The store plays the role of a browser's object-URL table: every accepted
//! upload gets exactly one `blob:` handle that resolves to its bytes until it
//! is revoked. External URLs (preloaded documents) pass through untouched and
//! are never owned by the store.
//!
//! Handles live for the lifetime of the gallery session. Closing the viewer
//! does not revoke anything because the card thumbnail and later re-opens
//! still dereference the same handle; [`Gallery::dispose`](crate::gallery::Gallery::dispose)
//! revokes them all at page unload.

use crate::types::{BLOB_SCHEME, ResourceUrl};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// What a resource URL dereferences to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfSource {
    /// In-memory bytes behind a live transient handle.
    Bytes(Arc<[u8]>),
    /// An externally managed location (relative path, file path or URL).
    Location(String),
}

/// Table of live transient handles.
///
/// Uses interior mutability so pipeline tasks on the same thread can resolve
/// handles through a shared `Rc<ResourceStore>`.
#[derive(Debug, Default)]
pub struct ResourceStore {
    handles: RefCell<HashMap<ResourceUrl, Arc<[u8]>>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh handle bound to `bytes`.
    pub fn allocate(&self, bytes: Arc<[u8]>) -> ResourceUrl {
        let url = ResourceUrl::new(format!("{BLOB_SCHEME}pdf-gallery/{}", Uuid::new_v4()));
        self.handles.borrow_mut().insert(url.clone(), bytes);
        tracing::debug!(%url, "allocated resource handle");
        url
    }

    /// Dereference a URL.
    ///
    /// Returns `None` for transient handles that were revoked or never
    /// allocated here.
    pub fn resolve(&self, url: &ResourceUrl) -> Option<PdfSource> {
        if url.is_transient() {
            self.handles
                .borrow()
                .get(url)
                .map(|bytes| PdfSource::Bytes(Arc::clone(bytes)))
        } else {
            Some(PdfSource::Location(url.as_str().to_string()))
        }
    }

    /// Dispose a handle. Returns `true` only for the call that actually
    /// released it, so callers can rely on exactly-once disposal.
    pub fn revoke(&self, url: &ResourceUrl) -> bool {
        let released = self.handles.borrow_mut().remove(url).is_some();
        if released {
            tracing::debug!(%url, "revoked resource handle");
        }
        released
    }

    pub fn is_live(&self, url: &ResourceUrl) -> bool {
        self.handles.borrow().contains_key(url)
    }

    pub fn live_count(&self) -> usize {
        self.handles.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(data: &[u8]) -> Arc<[u8]> {
        Arc::from(data)
    }

    #[test]
    fn allocate_returns_distinct_transient_handles() {
        let store = ResourceStore::new();
        let a = store.allocate(bytes(b"same"));
        let b = store.allocate(bytes(b"same"));
        assert_ne!(a, b);
        assert!(a.is_transient());
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn resolve_live_handle_yields_bytes() {
        let store = ResourceStore::new();
        let url = store.allocate(bytes(b"%PDF-1.7"));
        assert_eq!(store.resolve(&url), Some(PdfSource::Bytes(bytes(b"%PDF-1.7"))));
    }

    #[test]
    fn resolve_external_url_passes_through() {
        let store = ResourceStore::new();
        let url = ResourceUrl::new("DOCS_PDF/a.pdf");
        assert_eq!(
            store.resolve(&url),
            Some(PdfSource::Location("DOCS_PDF/a.pdf".to_string()))
        );
    }

    #[test]
    fn revoke_is_exactly_once() {
        let store = ResourceStore::new();
        let url = store.allocate(bytes(b"x"));
        assert!(store.revoke(&url));
        assert!(!store.revoke(&url));
        assert!(!store.is_live(&url));
        assert_eq!(store.resolve(&url), None);
    }

    #[test]
    fn revoke_never_touches_external_urls() {
        let store = ResourceStore::new();
        assert!(!store.revoke(&ResourceUrl::new("DOCS_PDF/a.pdf")));
    }

    #[test]
    fn unknown_transient_handle_does_not_resolve() {
        let store = ResourceStore::new();
        assert_eq!(store.resolve(&ResourceUrl::new("blob:pdf-gallery/missing")), None);
    }
}
