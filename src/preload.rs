//! The preloaded document list supplied by the hosting page.
//!
//! The host publishes its list as a script that assigns a JSON array to
//! `window.initialDocuments`:
//!
//! ```text
//! window.initialDocuments = [
//!   {
//!     "name": "report.pdf",
//!     "date": "01/15/2025",
//!     "url": "DOCS_PDF/report.pdf",
//!     "size": "2.4 MB"
//!   }
//! ];
//! ```
//!
//! Reading is lenient: a missing or non-array value means "no preloaded
//! documents" and malformed entries are skipped with a warning. The data file
//! may also be plain JSON.

use crate::types::PreloadedDocument;
use std::path::Path;
use thiserror::Error;

/// Assignment prefix of the generated data file.
pub const DATA_PREFIX: &str = "window.initialDocuments = ";

#[derive(Error, Debug)]
pub enum PreloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turn a host-supplied value into descriptors.
pub fn parse_descriptors(value: &serde_json::Value) -> Vec<PreloadedDocument> {
    let Some(entries) = value.as_array() else {
        if !value.is_null() {
            tracing::warn!("preloaded documents value is not an array, ignoring");
        }
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            match serde_json::from_value::<PreloadedDocument>(entry.clone()) {
                Ok(descriptor) => Some(descriptor),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping malformed preloaded document");
                    None
                }
            }
        })
        .collect()
}

/// Parse the contents of a data file, with or without the assignment wrapper.
pub fn parse_data_file(contents: &str) -> Result<Vec<PreloadedDocument>, PreloadError> {
    let trimmed = contents.trim();
    let json = trimmed
        .strip_prefix(DATA_PREFIX.trim_end())
        .unwrap_or(trimmed)
        .trim()
        .trim_end_matches(';');
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(parse_descriptors(&value))
}

/// Read a data file. A missing file means no preloaded documents.
pub fn read_data_file(path: &Path) -> Result<Vec<PreloadedDocument>, PreloadError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no data file");
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)?;
    parse_data_file(&contents)
}

/// Serialize descriptors as a data file script.
pub fn render_data_file(documents: &[PreloadedDocument]) -> Result<String, PreloadError> {
    let json = serde_json::to_string_pretty(documents)?;
    Ok(format!("{DATA_PREFIX}{json};\n"))
}

pub fn write_data_file(path: &Path, documents: &[PreloadedDocument]) -> Result<(), PreloadError> {
    std::fs::write(path, render_data_file(documents)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::preloaded;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn parses_array_of_descriptors() {
        let value = json!([
            {"name": "a.pdf", "date": "01/01/2025", "url": "DOCS_PDF/a.pdf", "size": "1 KB"},
            {"name": "b.pdf", "date": "01/02/2025", "url": "DOCS_PDF/b.pdf"}
        ]);
        let docs = parse_descriptors(&value);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].size_label.as_deref(), Some("1 KB"));
        assert_eq!(docs[1].size_label, None);
        assert_eq!(docs[1].resource_url.as_str(), "DOCS_PDF/b.pdf");
    }

    #[test]
    fn non_array_means_no_documents() {
        assert!(parse_descriptors(&serde_json::Value::Null).is_empty());
        assert!(parse_descriptors(&json!({"name": "a.pdf"})).is_empty());
        assert!(parse_descriptors(&json!("a.pdf")).is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let value = json!([
            {"name": "ok.pdf", "date": "01/01/2025", "url": "DOCS_PDF/ok.pdf"},
            {"name": "no-url.pdf", "date": "01/01/2025"},
            42
        ]);
        let docs = parse_descriptors(&value);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "ok.pdf");
    }

    #[test]
    fn data_file_roundtrip() {
        let docs = vec![preloaded("a.pdf"), preloaded("b.pdf")];
        let script = render_data_file(&docs).unwrap();
        assert!(script.starts_with("window.initialDocuments = ["));
        assert!(script.trim_end().ends_with("];"));
        assert_eq!(parse_data_file(&script).unwrap(), docs);
    }

    #[test]
    fn plain_json_data_file() {
        let docs = parse_data_file(r#"[{"name":"a.pdf","date":"d","url":"u"}]"#).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn garbage_data_file_is_error() {
        assert!(matches!(
            parse_data_file("window.initialDocuments = [oops;"),
            Err(PreloadError::Json(_))
        ));
    }

    #[test]
    fn missing_data_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let docs = read_data_file(&tmp.path().join("data.js")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn write_then_read_data_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.js");
        let docs = vec![preloaded("report.pdf")];
        write_data_file(&path, &docs).unwrap();
        assert_eq!(read_data_file(&path).unwrap(), docs);
    }
}
