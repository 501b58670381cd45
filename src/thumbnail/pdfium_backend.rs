//! PDFium renderer, via `pdfium-render`.
//!
//! The PDFium library is bound at runtime. Search order:
//! 1. `lib/` under the gallery root
//! 2. the executable's directory
//! 3. system library paths
//!
//! Relative locations (preloaded documents) are resolved against the gallery
//! root. Remote URLs are not fetched; they fail like any unreachable
//! resource and the card falls back to the glyph.

use super::calculations::{PageSize, Viewport};
use super::renderer::{PdfRenderer, RenderError};
use crate::resource::PdfSource;
use async_trait::async_trait;
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct PdfiumRenderer {
    pdfium: &'static Pdfium,
    base_dir: PathBuf,
}

/// A loaded page 1 handle: the document plus the page's index and size.
///
/// The page object itself is re-fetched at render time so no PDFium page
/// handle outlives a single call.
pub struct PdfiumPage {
    document: Rc<PdfDocument<'static>>,
    index: u16,
    size: PageSize,
}

impl PdfiumRenderer {
    /// Bind PDFium and resolve relative locations against `base_dir`.
    pub fn load(base_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let base_dir = base_dir.into();
        let pdfium = bind(&base_dir)?;
        tracing::debug!(base_dir = %base_dir.display(), "PDFium bound");
        Ok(Self {
            // One binding per process; PDFium is never unloaded.
            pdfium: Box::leak(Box::new(pdfium)),
            base_dir,
        })
    }

    fn local_path(&self, location: &str) -> Result<PathBuf, RenderError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Err(RenderError::Unavailable(format!(
                "remote location not supported: {location}"
            )));
        }
        let path = self.base_dir.join(location);
        if !path.is_file() {
            return Err(RenderError::Unavailable(format!(
                "file not found: {}",
                path.display()
            )));
        }
        Ok(path)
    }
}

fn bind(base_dir: &Path) -> Result<Pdfium, RenderError> {
    let mut dirs = vec![base_dir.join("lib")];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    for dir in &dirs {
        if let Ok(bindings) = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
            return Ok(Pdfium::new(bindings));
        }
    }
    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| RenderError::Backend(format!("failed to load PDFium: {e}")))
}

#[async_trait(?Send)]
impl PdfRenderer for PdfiumRenderer {
    type Document = Rc<PdfDocument<'static>>;
    type Page = PdfiumPage;

    async fn open(&self, source: PdfSource) -> Result<Self::Document, RenderError> {
        let document = match source {
            PdfSource::Bytes(bytes) => self.pdfium.load_pdf_from_byte_vec(bytes.to_vec(), None),
            PdfSource::Location(location) => {
                let path = self.local_path(&location)?;
                self.pdfium.load_pdf_from_file(&path, None)
            }
        }
        .map_err(|e| RenderError::Malformed(e.to_string()))?;
        Ok(Rc::new(document))
    }

    async fn page(&self, document: &Self::Document, number: u16) -> Result<Self::Page, RenderError> {
        let count = document.pages().len();
        let index = number
            .checked_sub(1)
            .filter(|i| *i < count)
            .ok_or(RenderError::PageOutOfRange {
                requested: number,
                count,
            })?;
        let page = document
            .pages()
            .get(index)
            .map_err(|e| RenderError::Malformed(e.to_string()))?;
        Ok(PdfiumPage {
            document: Rc::clone(document),
            index,
            size: PageSize {
                width: page.width().value,
                height: page.height().value,
            },
        })
    }

    fn natural_size(&self, page: &Self::Page) -> PageSize {
        page.size
    }

    async fn render(
        &self,
        page: &Self::Page,
        viewport: Viewport,
        surface: &mut RgbaImage,
    ) -> Result<(), RenderError> {
        let pdf_page = page
            .document
            .pages()
            .get(page.index)
            .map_err(|e| RenderError::Render(e.to_string()))?;

        let config = PdfRenderConfig::new()
            .set_target_width(viewport.width as i32)
            .set_target_height(viewport.height as i32);
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| RenderError::Render(e.to_string()))?;

        let raster = RgbaImage::from_raw(viewport.width, viewport.height, bitmap.as_rgba_bytes())
            .ok_or_else(|| {
                RenderError::Render(format!(
                    "bitmap does not match viewport {}x{}",
                    viewport.width, viewport.height
                ))
            })?;
        image::imageops::replace(surface, &raster, 0, 0);
        Ok(())
    }
}
