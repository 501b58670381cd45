//! Thumbnail generation: page 1 of each document, rasterized at card width.
//!
//! | Step | Where |
//! |---|---|
//! | **Resolve** | [`ResourceStore::resolve`](crate::resource::ResourceStore::resolve) |
//! | **Open / page 1** | [`PdfRenderer::open`], [`PdfRenderer::page`] |
//! | **Viewport** | [`fit_to_width`] |
//! | **Rasterize** | [`PdfRenderer::render`] into an `RgbaImage` |
//!
//! The module is split into:
//! - **Calculations**: Pure viewport math (unit testable)
//! - **Renderer**: [`PdfRenderer`] trait + [`UnavailableRenderer`] (+ `PdfiumRenderer`)
//! - **Pipeline**: [`ThumbnailTask`] and the [`ThumbnailState`] machine

mod calculations;
#[cfg(feature = "pdfium")]
mod pdfium_backend;
pub mod pipeline;
pub mod renderer;

pub use calculations::{PageSize, Viewport, fit_to_width};
#[cfg(feature = "pdfium")]
pub use pdfium_backend::PdfiumRenderer;
pub use pipeline::{THUMBNAIL_PAGE, ThumbnailError, ThumbnailState, ThumbnailTask, render_first_page};
pub use renderer::{PdfRenderer, RenderError, UnavailableRenderer};
