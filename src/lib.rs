//! # PDF Gallery
//!
//! A document gallery for PDF files. Documents come from two places: files
//! the user drops or picks during a session, and a preloaded list published by
//! the hosting page. Every document is shown as a card with a rendered
//! first-page thumbnail and opens in a single modal viewer.
//!
//! # Architecture
//!
//! ```text
//! FileCandidate ──► UploadIngestor ──┐
//!                                    ├──► Registry ──► Gallery::render ──► CardGrid
//! PreloadedDocument ──► hydrate ─────┘                    │
//!                                                         └──► ThumbnailTask per card
//!                                                                (PdfRenderer, async)
//! ```
//!
//! A [`gallery::Gallery`] owns one session: the registry, the resource store
//! holding uploaded bytes behind `blob:` handles, the card grid, the viewer and
//! the upload dialog flag. Every registry change rebuilds the grid with all
//! cards `Loading` and spawns one thumbnail task per card on a single-threaded
//! executor. Tasks report back under a generation ticket, so completions from
//! an older render are dropped.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Session state and control flow: hydrate, upload, render, search, viewer, dispose |
//! | [`registry`] | Ordered document catalog: insert at front, one-time hydration, name queries |
//! | [`upload`] | Validates file candidates and turns accepted ones into uploaded documents |
//! | [`resource`] | Transient `blob:` handles for uploaded bytes; exactly-once revocation |
//! | [`thumbnail`] | First-page thumbnail pipeline over a pluggable [`thumbnail::PdfRenderer`] |
//! | [`grid`] | Card snapshot keyed by render generation; receives pipeline outcomes |
//! | [`viewer`] | Single modal viewer state and display binding |
//! | [`preload`] | Host-supplied document list (`window.initialDocuments`) parsing and writing |
//! | [`scan`] | Builds the preloaded list from a directory of PDFs |
//! | [`generate`] | Static gallery page and thumbnail PNGs using Maud |
//! | [`config`] | `gallery.toml` loading, validation and merging over stock defaults |
//! | [`size`] | Byte counts to `1.17 KB`-style labels |
//! | [`types`] | Shared types: [`types::Document`], ids, resource URLs, file candidates |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Single-Threaded Tasks
//!
//! Thumbnail tasks run on a tokio current-thread runtime inside a
//! [`tokio::task::LocalSet`]. Session state is shared with tasks through
//! `Rc<RefCell<_>>` and only borrowed between suspension points, so no
//! locking is needed and renderers do not have to be `Send`.
//!
//! ## Session-Lifetime Handles
//!
//! An uploaded document's handle stays live for the whole session. Closing
//! the viewer only clears the display binding; the card thumbnail and later
//! re-opens still need the handle. [`gallery::Gallery::dispose`] revokes every
//! uploaded handle exactly once at the end of the session.
//!
//! ## Runtime-Bound PDFium
//!
//! With the `pdfium` feature, thumbnails are rendered by PDFium through
//! `pdfium-render`. The shared library is bound at runtime; when it is missing
//! the gallery still works and every card falls back to the PDF glyph.

pub mod config;
pub mod gallery;
pub mod generate;
pub mod grid;
pub mod output;
pub mod preload;
pub mod registry;
pub mod resource;
pub mod scan;
pub mod size;
pub mod thumbnail;
pub mod types;
pub mod upload;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
