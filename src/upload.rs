//! Upload ingestion: file candidates in, uploaded documents out.
//!
//! Each candidate is judged on its own. Accepted candidates get one fresh
//! transient handle and become a [`Document`] at the front of the registry;
//! rejected ones produce a [`Rejection`] and leave the registry untouched.
//! The ingestor never disposes handles.

use crate::config::UploadConfig;
use crate::registry::Registry;
use crate::resource::ResourceStore;
use crate::size::format_size;
use crate::types::{Document, DocumentId, FileCandidate, Origin};
use chrono::{Local, NaiveDate};
use std::fmt::{self, Write as _};

/// Message shown to the user for every rejected candidate.
pub const REJECTION_MESSAGE: &str = "Please upload PDF files only.";

const FALLBACK_DATE_FORMAT: &str = "%m/%d/%Y";

/// A candidate that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub file_name: String,
    pub mime_type: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.file_name, self.mime_type, REJECTION_MESSAGE)
    }
}

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Ids of the inserted documents, in processing order.
    pub accepted: Vec<DocumentId>,
    pub rejected: Vec<Rejection>,
}

impl IngestReport {
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}

/// User-visible notification sink.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that reports through the log. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

#[derive(Debug, Clone)]
pub struct UploadIngestor {
    accepted_mime_type: String,
    date_format: String,
}

impl UploadIngestor {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            accepted_mime_type: config.accepted_mime_type.clone(),
            date_format: config.date_format.clone(),
        }
    }

    /// Ingest `candidates`, labelling accepted ones with today's local date.
    pub fn ingest(
        &self,
        candidates: impl IntoIterator<Item = FileCandidate>,
        registry: &mut Registry,
        resources: &ResourceStore,
    ) -> IngestReport {
        self.ingest_on(candidates, Local::now().date_naive(), registry, resources)
    }

    /// Ingest `candidates` as if uploaded on `today`.
    pub fn ingest_on(
        &self,
        candidates: impl IntoIterator<Item = FileCandidate>,
        today: NaiveDate,
        registry: &mut Registry,
        resources: &ResourceStore,
    ) -> IngestReport {
        let date_label = self.date_label(today);
        let mut report = IngestReport::default();

        for candidate in candidates {
            if !self.accepts(&candidate) {
                tracing::info!(
                    file = %candidate.name,
                    mime_type = %candidate.mime_type,
                    "rejected upload"
                );
                report.rejected.push(Rejection {
                    file_name: candidate.name,
                    mime_type: candidate.mime_type,
                });
                continue;
            }

            let resource_url = resources.allocate(candidate.bytes.clone());
            let document = Document {
                id: DocumentId::new(),
                name: candidate.name.clone(),
                size_label: Some(format_size(candidate.byte_length())),
                date_label: date_label.clone(),
                resource_url,
                origin: Origin::Uploaded,
                raw_file: Some(candidate),
            };
            tracing::info!(id = %document.id, name = %document.name, "accepted upload");
            report.accepted.push(document.id);
            registry.insert(document);
        }

        report
    }

    /// Exact media type match, no sniffing and no extension fallback.
    pub fn accepts(&self, candidate: &FileCandidate) -> bool {
        candidate.mime_type == self.accepted_mime_type
    }

    fn date_label(&self, today: NaiveDate) -> String {
        date_label(today, &self.date_format)
    }
}

/// Format `date` with a `chrono` format string, falling back to
/// `%m/%d/%Y` when the format is invalid.
pub fn date_label(date: NaiveDate, format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", date.format(format)).is_ok() {
        return label;
    }
    tracing::warn!(format, "invalid date format, using default");
    date.format(FALLBACK_DATE_FORMAT).to_string()
}

impl Default for UploadIngestor {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{names, pdf_file, text_file};
    use crate::types::FileCandidate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn accepts_pdf_and_rejects_text() {
        let ingestor = UploadIngestor::default();
        let mut registry = Registry::new();
        let resources = ResourceStore::new();

        let report = ingestor.ingest_on(
            vec![pdf_file("a.pdf", 1200), text_file("b.txt")],
            today(),
            &mut registry,
            &resources,
        );

        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].file_name, "b.txt");
        assert_eq!(registry.count(), 1);

        let doc = registry.iter().next().unwrap();
        assert_eq!(doc.name, "a.pdf");
        assert_eq!(doc.size_label.as_deref(), Some("1.17 KB"));
        assert_eq!(doc.date_label, "03/07/2025");
        assert_eq!(doc.origin, Origin::Uploaded);
        assert!(doc.raw_file.is_some());
    }

    #[test]
    fn each_accepted_candidate_allocates_one_handle() {
        let ingestor = UploadIngestor::default();
        let mut registry = Registry::new();
        let resources = ResourceStore::new();

        ingestor.ingest_on(
            vec![pdf_file("a.pdf", 10), pdf_file("b.pdf", 10), text_file("c.txt")],
            today(),
            &mut registry,
            &resources,
        );

        assert_eq!(resources.live_count(), 2);
        for doc in registry.iter() {
            assert!(resources.is_live(&doc.resource_url));
        }
    }

    #[test]
    fn duplicate_names_are_not_deduplicated() {
        let ingestor = UploadIngestor::default();
        let mut registry = Registry::new();
        let resources = ResourceStore::new();

        let report = ingestor.ingest_on(
            vec![pdf_file("same.pdf", 10), pdf_file("same.pdf", 10)],
            today(),
            &mut registry,
            &resources,
        );

        assert_eq!(report.accepted.len(), 2);
        assert_ne!(report.accepted[0], report.accepted[1]);
        let urls: Vec<_> = registry.iter().map(|d| d.resource_url.clone()).collect();
        assert_ne!(urls[0], urls[1]);
    }

    #[test]
    fn batch_is_inserted_most_recent_first() {
        let ingestor = UploadIngestor::default();
        let mut registry = Registry::new();
        let resources = ResourceStore::new();

        ingestor.ingest_on(
            vec![pdf_file("first.pdf", 1), pdf_file("second.pdf", 1)],
            today(),
            &mut registry,
            &resources,
        );

        assert_eq!(names(registry.iter()), vec!["second.pdf", "first.pdf"]);
    }

    #[test]
    fn media_type_must_match_exactly() {
        let ingestor = UploadIngestor::default();
        let sneaky = FileCandidate::new("x.pdf", "application/pdf; charset=binary", vec![1u8]);
        let upper = FileCandidate::new("y.pdf", "APPLICATION/PDF", vec![1u8]);
        let untyped = FileCandidate::new("z.pdf", "", vec![1u8]);
        assert!(!ingestor.accepts(&sneaky));
        assert!(!ingestor.accepts(&upper));
        assert!(!ingestor.accepts(&untyped));
    }

    #[test]
    fn empty_batch_is_noop() {
        let ingestor = UploadIngestor::default();
        let mut registry = Registry::new();
        let resources = ResourceStore::new();
        let report = ingestor.ingest_on(Vec::new(), today(), &mut registry, &resources);
        assert!(report.is_empty());
        assert!(registry.is_empty());
        assert_eq!(resources.live_count(), 0);
    }

    #[test]
    fn custom_date_format() {
        let ingestor = UploadIngestor::new(&UploadConfig {
            date_format: "%Y-%m-%d".into(),
            ..UploadConfig::default()
        });
        let mut registry = Registry::new();
        let resources = ResourceStore::new();
        ingestor.ingest_on(vec![pdf_file("a.pdf", 1)], today(), &mut registry, &resources);
        assert_eq!(registry.iter().next().unwrap().date_label, "2025-03-07");
    }

    #[test]
    fn invalid_date_format_falls_back() {
        assert_eq!(date_label(today(), "%Y-%"), "03/07/2025");
    }

    #[test]
    fn rejection_display_names_the_file() {
        let rejection = Rejection {
            file_name: "b.txt".into(),
            mime_type: "text/plain".into(),
        };
        assert_eq!(
            rejection.to_string(),
            "b.txt (text/plain): Please upload PDF files only."
        );
    }
}
