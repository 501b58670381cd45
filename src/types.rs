//! Shared types used across the registry, pipeline and viewer.
//!
//! A [`Document`] is an immutable value record. It is created once, by the
//! upload ingestor or by hydration, and cloned freely into grid snapshots and
//! viewer sessions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique, opaque identity of a document for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dereferenceable locator for a document's bytes.
///
/// Either a transient handle minted by [`ResourceStore`](crate::resource::ResourceStore)
/// (`blob:` scheme) or an externally supplied URL/path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceUrl(String);

/// Scheme prefix of transient handles.
pub const BLOB_SCHEME: &str = "blob:";

impl ResourceUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a transient handle rather than an external URL.
    pub fn is_transient(&self) -> bool {
        self.0.starts_with(BLOB_SCHEME)
    }
}

impl fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Added by the user during this session. Owns its transient handle.
    Uploaded,
    /// Supplied by the hosting page at startup. Never owns its URL.
    Preloaded,
}

/// A file-like input from drag-and-drop or the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn byte_length(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Host-provided descriptor of a preloaded document.
///
/// Field names match the data file written by the directory scanner
/// (`window.initialDocuments`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadedDocument {
    pub name: String,
    #[serde(rename = "date")]
    pub date_label: String,
    #[serde(rename = "url")]
    pub resource_url: ResourceUrl,
    #[serde(rename = "size", default, skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
}

/// One PDF known to the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    /// Absent for preloaded documents that carry no size information.
    pub size_label: Option<String>,
    pub date_label: String,
    pub resource_url: ResourceUrl,
    pub origin: Origin,
    /// The uploaded file. Only present for [`Origin::Uploaded`].
    pub raw_file: Option<FileCandidate>,
}

impl Document {
    /// Build a preloaded document from a host descriptor with a fresh id.
    pub fn preloaded(descriptor: PreloadedDocument) -> Self {
        Self {
            id: DocumentId::new(),
            name: descriptor.name,
            size_label: descriptor.size_label,
            date_label: descriptor.date_label,
            resource_url: descriptor.resource_url,
            origin: Origin::Preloaded,
            raw_file: None,
        }
    }

    /// Whether this document owns (and must eventually dispose) its URL.
    pub fn owns_resource(&self) -> bool {
        self.origin == Origin::Uploaded
    }

    /// Secondary card line: `date • size`, or just the date.
    pub fn info_line(&self) -> String {
        match &self.size_label {
            Some(size) => format!("{} • {}", self.date_label, size),
            None => self.date_label.clone(),
        }
    }
}
