//! Shared test utilities for the pdf-gallery test suite.
//!
//! Builders for documents, host descriptors and file candidates, plus small
//! extractors for asserting on orderings.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let mut registry = Registry::new();
//! registry.hydrate(vec![preloaded("A"), preloaded("B")]).unwrap();
//! registry.insert(uploaded("C"));
//! assert_eq!(names(registry.iter()), vec!["C", "A", "B"]);
//! ```

use crate::types::{
    Document, DocumentId, FileCandidate, Origin, PreloadedDocument, ResourceUrl,
};

// =========================================================================
// Builders
// =========================================================================

/// A host descriptor pointing at `DOCS_PDF/<name>`.
pub fn preloaded(name: &str) -> PreloadedDocument {
    PreloadedDocument {
        name: name.to_string(),
        date_label: "01/15/2025".to_string(),
        resource_url: ResourceUrl::new(format!("DOCS_PDF/{name}")),
        size_label: Some("1 KB".to_string()),
    }
}

/// An uploaded document with a made-up transient handle.
///
/// The handle is not registered with any store; use the ingestor when the
/// test needs a resolvable handle.
pub fn uploaded(name: &str) -> Document {
    let id = DocumentId::new();
    let file = pdf_file(name, 1024);
    Document {
        id,
        name: name.to_string(),
        size_label: Some("1 KB".to_string()),
        date_label: "01/15/2025".to_string(),
        resource_url: ResourceUrl::new(format!("blob:pdf-gallery/{id}")),
        origin: Origin::Uploaded,
        raw_file: Some(file),
    }
}

/// A PDF candidate of `len` bytes. The content is not a valid PDF.
pub fn pdf_file(name: &str, len: usize) -> FileCandidate {
    FileCandidate::new(name, "application/pdf", vec![b'%'; len])
}

/// A plain-text candidate.
pub fn text_file(name: &str) -> FileCandidate {
    FileCandidate::new(name, "text/plain", b"hello".to_vec())
}

// =========================================================================
// Extractors
// =========================================================================

/// Document names in iteration order.
pub fn names<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Vec<&'a str> {
    docs.into_iter().map(|d| d.name.as_str()).collect()
}
