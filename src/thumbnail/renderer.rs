//! PDF renderer trait and shared types.
//!
//! The [`PdfRenderer`] trait is the gallery's view of a PDF rendering
//! capability: open a resource, fetch a page, read its natural size, and
//! rasterize it into a caller-provided surface. Each async step is a
//! suspension point of the thumbnail pipeline.
//!
//! Implementations:
//!
//! | Renderer | Availability |
//! |---|---|
//! | `PdfiumRenderer` | `pdfium` cargo feature, PDFium bound at runtime |
//! | [`UnavailableRenderer`] | always; every open fails, so cards degrade to the glyph |
//!
//! Renderers run on the single-threaded gallery executor, so the trait does
//! not require `Send`.

use super::calculations::{PageSize, Viewport};
use crate::resource::PdfSource;
use async_trait::async_trait;
use image::RgbaImage;
use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Malformed PDF: {0}")]
    Malformed(String),
    #[error("Resource unavailable: {0}")]
    Unavailable(String),
    #[error("Page {requested} out of range (document has {count} pages)")]
    PageOutOfRange { requested: u16, count: u16 },
    #[error("Render failed: {0}")]
    Render(String),
    #[error("PDF rendering backend unavailable: {0}")]
    Backend(String),
}

/// Trait for PDF rendering backends.
///
/// Page numbers are 1-based.
#[async_trait(?Send)]
pub trait PdfRenderer {
    /// An opened PDF document.
    type Document: 'static;
    /// A page fetched from a [`Self::Document`].
    type Page: 'static;

    /// Open a resource as a PDF document.
    async fn open(&self, source: PdfSource) -> Result<Self::Document, RenderError>;

    /// Fetch a page by 1-based number.
    async fn page(&self, document: &Self::Document, number: u16) -> Result<Self::Page, RenderError>;

    /// The page's size at scale 1.
    fn natural_size(&self, page: &Self::Page) -> PageSize;

    /// Rasterize `page` at `viewport` into `surface`, which is already sized
    /// to the viewport.
    async fn render(
        &self,
        page: &Self::Page,
        viewport: Viewport,
        surface: &mut RgbaImage,
    ) -> Result<(), RenderError>;
}

/// Renderer used when no PDF backend is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRenderer;

#[async_trait(?Send)]
impl PdfRenderer for UnavailableRenderer {
    type Document = Infallible;
    type Page = Infallible;

    async fn open(&self, _source: PdfSource) -> Result<Self::Document, RenderError> {
        Err(RenderError::Backend(
            "built without the `pdfium` feature".to_string(),
        ))
    }

    async fn page(&self, document: &Self::Document, _number: u16) -> Result<Self::Page, RenderError> {
        match *document {}
    }

    fn natural_size(&self, page: &Self::Page) -> PageSize {
        match *page {}
    }

    async fn render(
        &self,
        page: &Self::Page,
        _viewport: Viewport,
        _surface: &mut RgbaImage,
    ) -> Result<(), RenderError> {
        match *page {}
    }
}
