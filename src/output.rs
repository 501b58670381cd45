//! CLI output formatting.
//!
//! Every document is displayed by its positional index and name, with the
//! location it came from and its card info line as indented context.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Documents
//! 001 report.pdf
//!     Source: DOCS_PDF/report.pdf
//!     01/15/2025 • 2.4 MB
//! 002 slides.pdf
//!     Source: DOCS_PDF/slides.pdf
//!     01/16/2025 • 880 KB
//!
//! Scanned 2 documents into data.js
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 report.pdf → thumbnails/001-report.png
//! 002 slides.pdf → PDF glyph
//!
//! Generated index.html (1 thumbnail, 1 fallback)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::Generated;
use crate::grid::Card;
use crate::scan::Catalog;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Display `path` relative to `root` when possible.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

pub fn format_scan_output(catalog: &Catalog, data_file: &Path, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if catalog.created_dir {
        lines.push(format!(
            "Created {}/",
            relative(&catalog.pdf_dir, root)
        ));
        lines.push(String::new());
    }

    lines.push("Documents".to_string());
    if catalog.documents.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (idx, doc) in catalog.documents.iter().enumerate() {
        lines.push(format!("{} {}", format_index(idx + 1), doc.name));
        lines.push(format!("{}Source: {}", indent(1), doc.resource_url));
        match &doc.size_label {
            Some(size) => lines.push(format!("{}{} • {}", indent(1), doc.date_label, size)),
            None => lines.push(format!("{}{}", indent(1), doc.date_label)),
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Scanned {} into {}",
        plural(catalog.documents.len(), "document"),
        relative(data_file, root)
    ));
    lines
}

pub fn print_scan_output(catalog: &Catalog, data_file: &Path, root: &Path) {
    for line in format_scan_output(catalog, data_file, root) {
        println!("{}", line);
    }
}

pub fn format_build_output(cards: &[Card], generated: &Generated, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (idx, card) in cards.iter().enumerate() {
        let target = generated
            .thumbnails
            .get(idx)
            .and_then(|t| t.as_deref())
            .unwrap_or("PDF glyph");
        lines.push(format!(
            "{} {} → {}",
            format_index(idx + 1),
            card.document.name,
            target
        ));
    }

    if !cards.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Generated {} ({}, {})",
        relative(&generated.index, root),
        plural(generated.rendered(), "thumbnail"),
        plural(generated.fallbacks(), "fallback")
    ));
    lines
}

pub fn print_build_output(cards: &[Card], generated: &Generated, root: &Path) {
    for line in format_build_output(cards, generated, root) {
        println!("{}", line);
    }
}
