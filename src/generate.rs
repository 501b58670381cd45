//! Static gallery page generation.
//!
//! Takes a rendered card grid and writes a self-contained gallery page next to
//! the PDFs it links to.
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html                 # Stats header + card grid
//! └── thumbnails/
//!     ├── 001-report.png         # Page 1 of each card that rendered
//!     └── 002-slides.png
//! ```
//!
//! Cards whose thumbnail failed show the inline PDF glyph instead of an image.
//! Every card links to its document's URL. An empty grid renders the
//! "No documents found" state.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Styles come from `static/style.css`, embedded at compile time.

use crate::config::SiteConfig;
use crate::gallery::GalleryStats;
use crate::grid::Card;
use crate::thumbnail::ThumbnailState;
use image::ImageFormat;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Directory (relative to the output root) holding thumbnail PNGs.
pub const THUMBNAIL_DIR: &str = "thumbnails";

const CSS: &str = include_str!("../static/style.css");

const PDF_GLYPH: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1" stroke-linecap="round" stroke-linejoin="round"><path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"></path><polyline points="14 2 14 8 20 8"></polyline><text x="12" y="18" text-anchor="middle" font-size="6" font-weight="bold" fill="currentColor">PDF</text></svg>"#;

const EMPTY_GLYPH: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1" stroke-linecap="round" stroke-linejoin="round"><path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"></path><polyline points="14 2 14 8 20 8"></polyline><line x1="12" y1="18" x2="12" y2="12"></line><line x1="9" y1="15" x2="15" y2="15"></line></svg>"#;

/// What [`generate`] wrote.
#[derive(Debug)]
pub struct Generated {
    pub index: PathBuf,
    /// Relative thumbnail path per card, `None` where the glyph is shown.
    pub thumbnails: Vec<Option<String>>,
}

impl Generated {
    pub fn rendered(&self) -> usize {
        self.thumbnails.iter().filter(|t| t.is_some()).count()
    }

    pub fn fallbacks(&self) -> usize {
        self.thumbnails.len() - self.rendered()
    }
}

/// Write thumbnails and `index.html` into `output_dir`.
pub fn generate(
    site: &SiteConfig,
    stats: GalleryStats,
    cards: &[Card],
    output_dir: &Path,
) -> Result<Generated, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let thumbnails = write_thumbnails(cards, output_dir)?;

    let index = output_dir.join("index.html");
    let page = render_index(site, stats, cards, &thumbnails);
    fs::write(&index, page.into_string())?;
    tracing::info!(path = %index.display(), cards = cards.len(), "generated gallery page");

    Ok(Generated { index, thumbnails })
}

/// Save every ready thumbnail as a PNG. Returns one entry per card.
pub fn write_thumbnails(cards: &[Card], output_dir: &Path) -> Result<Vec<Option<String>>, GenerateError> {
    let dir = output_dir.join(THUMBNAIL_DIR);
    let mut written = Vec::with_capacity(cards.len());

    for (idx, card) in cards.iter().enumerate() {
        let ThumbnailState::Ready(raster) = &card.thumbnail else {
            written.push(None);
            continue;
        };
        fs::create_dir_all(&dir)?;
        let file_name = thumbnail_file_name(idx + 1, &card.document.name);
        raster.save_with_format(dir.join(&file_name), ImageFormat::Png)?;
        written.push(Some(format!("{THUMBNAIL_DIR}/{file_name}")));
    }

    Ok(written)
}

/// `NNN-slug.png` for the card at 1-based `position`.
///
/// The position prefix keeps files unique when names collide.
pub fn thumbnail_file_name(position: usize, name: &str) -> String {
    let stem = name
        .strip_suffix(".pdf")
        .or_else(|| name.strip_suffix(".PDF"))
        .unwrap_or(name);
    format!("{:0>3}-{}.png", position, slug(stem))
}

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn stats_header(title: &str, stats: GalleryStats) -> Markup {
    html! {
        header.gallery-header {
            h1 { (title) }
            div.stats {
                div.stat-card {
                    span.stat-value id="totalDocs" { (stats.total) }
                    span.stat-label { "Total Documents" }
                }
                div.stat-card {
                    span.stat-value id="recentDocs" { (stats.recent) }
                    span.stat-label { "Recent Uploads" }
                }
            }
        }
    }
}

fn render_card(card: &Card, thumbnail: Option<&str>) -> Markup {
    let document = &card.document;
    html! {
        a.doc-card href=(document.resource_url.as_str()) target="_blank" rel="noopener" {
            div.doc-preview {
                @match thumbnail {
                    Some(src) => {
                        img src=(src) alt=(document.name) loading="lazy";
                    }
                    None => {
                        (PreEscaped(PDF_GLYPH))
                    }
                }
            }
            div.doc-info {
                h4 { (document.name) }
                p { (document.info_line()) }
            }
        }
    }
}

fn empty_state() -> Markup {
    html! {
        div.empty-state {
            (PreEscaped(EMPTY_GLYPH))
            p { "No documents found" }
            p.hint { "Upload a PDF to get started" }
        }
    }
}

/// Renders the gallery page.
///
/// `thumbnails` is parallel to `cards`; missing entries show the glyph.
pub fn render_index(
    site: &SiteConfig,
    stats: GalleryStats,
    cards: &[Card],
    thumbnails: &[Option<String>],
) -> Markup {
    let content = html! {
        (stats_header(&site.title, stats))
        main.documents-grid id="documentsGrid" {
            @if cards.is_empty() {
                (empty_state())
            } @else {
                @for (idx, card) in cards.iter().enumerate() {
                    (render_card(card, thumbnails.get(idx).and_then(|t| t.as_deref())))
                }
            }
        }
    };

    base_document(&site.title, content)
}
