//! Per-card thumbnail tasks.
//!
//! A task renders page 1 of one document and reports the outcome to the card
//! grid under the [`RenderTicket`] it was spawned with:
//!
//! ```text
//! Loading ──► Ready(raster)     page 1 rendered at the target width
//!    │
//!    └──────► Failed            any error; card shows the PDF glyph
//! ```
//!
//! Both outcomes are terminal. Failures are logged and swallowed here; nothing
//! escapes a task. If the grid was rebuilt (or dropped) while the task was in
//! flight, the completion is discarded by the grid.

use super::calculations::fit_to_width;
use super::renderer::{PdfRenderer, RenderError};
use crate::grid::{CardGrid, RenderTicket};
use crate::resource::ResourceStore;
use crate::types::{Document, ResourceUrl};
use image::RgbaImage;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use thiserror::Error;

/// Page rendered as the thumbnail.
pub const THUMBNAIL_PAGE: u16 = 1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThumbnailError {
    #[error("Resource handle is no longer valid: {0}")]
    ResourceRevoked(ResourceUrl),
    #[error("Page has unusable size {width}x{height}")]
    InvalidPageSize { width: f32, height: f32 },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Display state of one card's preview.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbnailState {
    /// Spinner placeholder, shown before any async work starts.
    Loading,
    /// Rendered first page.
    Ready(Arc<RgbaImage>),
    /// Generic "PDF" glyph.
    Failed,
}

impl ThumbnailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ThumbnailState::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }
}

/// Resolve, open and rasterize page 1 of `document` at `target_width`.
pub async fn render_first_page<R: PdfRenderer + ?Sized>(
    renderer: &R,
    resources: &ResourceStore,
    document: &Document,
    target_width: u32,
) -> Result<RgbaImage, ThumbnailError> {
    let source = resources
        .resolve(&document.resource_url)
        .ok_or_else(|| ThumbnailError::ResourceRevoked(document.resource_url.clone()))?;

    let pdf = renderer.open(source).await?;
    let page = renderer.page(&pdf, THUMBNAIL_PAGE).await?;

    let size = renderer.natural_size(&page);
    let viewport = fit_to_width(size, target_width).ok_or(ThumbnailError::InvalidPageSize {
        width: size.width,
        height: size.height,
    })?;

    let mut surface = RgbaImage::new(viewport.width, viewport.height);
    renderer.render(&page, viewport, &mut surface).await?;
    Ok(surface)
}

/// One spawned pipeline instance.
pub struct ThumbnailTask<R> {
    pub ticket: RenderTicket,
    pub document: Document,
    pub renderer: Rc<R>,
    pub resources: Rc<ResourceStore>,
    pub grid: Weak<RefCell<CardGrid>>,
    pub target_width: u32,
}

impl<R: PdfRenderer> ThumbnailTask<R> {
    /// Run to completion and hand the outcome to the grid.
    ///
    /// Returns the state that was produced, whether or not the grid still
    /// wanted it.
    pub async fn run(self) -> ThumbnailState {
        let state = match render_first_page(
            self.renderer.as_ref(),
            &self.resources,
            &self.document,
            self.target_width,
        )
        .await
        {
            Ok(raster) => {
                tracing::debug!(
                    name = %self.document.name,
                    width = raster.width(),
                    height = raster.height(),
                    "thumbnail ready"
                );
                ThumbnailState::Ready(Arc::new(raster))
            }
            Err(err) => {
                tracing::warn!(
                    name = %self.document.name,
                    error = %err,
                    "thumbnail generation failed"
                );
                ThumbnailState::Failed
            }
        };

        match self.grid.upgrade() {
            Some(grid) => {
                grid.borrow_mut().complete(self.ticket, state.clone());
            }
            None => tracing::trace!(name = %self.document.name, "grid gone, dropping thumbnail"),
        }
        state
    }
}
