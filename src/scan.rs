//! PDF directory scanning.
//!
//! Produces the preloaded document list for a gallery root. The scanner looks
//! at a single directory (non-recursive) and turns every `.pdf` file in it
//! into a [`PreloadedDocument`]:
//!
//! ```text
//! site/                      # Gallery root
//! ├── gallery.toml           # Configuration (optional)
//! ├── data.js                # Written by `scan`
//! └── DOCS_PDF/              # [scan] pdf_dir
//!     ├── report.pdf         # → {name, date (mtime), url: DOCS_PDF/report.pdf, size}
//!     ├── Slides.PDF         # extension match is case-insensitive
//!     └── notes.txt          # ignored
//! ```
//!
//! A missing PDF directory is created and scanned as empty. Documents are
//! sorted by file name so the output is stable across runs.

use crate::config::GalleryConfig;
use crate::preload::{self, PreloadError};
use crate::size::format_size;
use crate::types::{PreloadedDocument, ResourceUrl};
use crate::upload::date_label;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Data file error: {0}")]
    Data(#[from] PreloadError),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Scan output.
#[derive(Debug)]
pub struct Catalog {
    /// The scanned directory.
    pub pdf_dir: PathBuf,
    /// Whether the directory had to be created.
    pub created_dir: bool,
    pub documents: Vec<PreloadedDocument>,
}

/// Scan `root`'s PDF directory.
pub fn scan(root: &Path, config: &GalleryConfig) -> Result<Catalog, ScanError> {
    let pdf_dir = root.join(&config.scan.pdf_dir);

    let created_dir = !pdf_dir.exists();
    if created_dir {
        tracing::info!(dir = %pdf_dir.display(), "PDF directory not found, creating it");
        fs::create_dir_all(&pdf_dir)?;
    } else if !pdf_dir.is_dir() {
        return Err(ScanError::NotADirectory(pdf_dir));
    }

    let documents = collect_pdfs(&pdf_dir)?
        .iter()
        .map(|path| describe(path, config))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(documents = documents.len(), "scan complete");

    Ok(Catalog {
        pdf_dir,
        created_dir,
        documents,
    })
}

/// Scan and write the data file. Returns the catalog and the written path.
pub fn scan_to_data_file(root: &Path, config: &GalleryConfig) -> Result<(Catalog, PathBuf), ScanError> {
    let catalog = scan(root, config)?;
    let output = root.join(&config.scan.output_file);
    preload::write_data_file(&output, &catalog.documents)?;
    Ok((catalog, output))
}

fn collect_pdfs(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_pdf(p))
        .collect();

    entries.sort();
    Ok(entries)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn describe(path: &Path, config: &GalleryConfig) -> Result<PreloadedDocument, ScanError> {
    let metadata = fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let modified: DateTime<Local> = metadata.modified()?.into();

    Ok(PreloadedDocument {
        resource_url: ResourceUrl::new(format!(
            "{}/{}",
            config.scan.pdf_dir.trim_end_matches('/'),
            name
        )),
        name,
        date_label: date_label(modified.date_naive(), &config.upload.date_format),
        size_label: Some(format_size(metadata.len())),
    })
}
