//! The gallery session: one page's worth of state and control flow.
//!
//! ```text
//! hydrate / upload ──► Registry ──► render ──► CardGrid (all Loading)
//!                                      │
//!                                      └──► spawn_local(ThumbnailTask) × cards
//!                                                   │
//!                                                   └──► CardGrid::complete
//! card click ──► open ──► ViewerController
//! ```
//!
//! Everything runs on one thread. Thumbnail tasks are spawned with
//! [`tokio::task::spawn_local`], so every method that renders must be called
//! from inside a [`tokio::task::LocalSet`]. The grid is shared with tasks as
//! `Rc<RefCell<_>>` and only borrowed for the synchronous rebuild/complete
//! steps, never across an await.

use crate::config::GalleryConfig;
use crate::grid::{CardGrid, Generation, RenderTicket};
use crate::preload::parse_descriptors;
use crate::registry::{Registry, RegistryError};
use crate::resource::ResourceStore;
use crate::thumbnail::{PdfRenderer, ThumbnailState, ThumbnailTask};
use crate::types::{Document, DocumentId, FileCandidate, PreloadedDocument};
use crate::upload::{IngestReport, Notifier, TracingNotifier, UploadIngestor};
use crate::viewer::ViewerController;
use futures::future::join_all;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GalleryError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("Unknown document: {0}")]
    UnknownDocument(DocumentId),
}

/// Header counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryStats {
    /// Documents in the registry.
    pub total: usize,
    /// Documents uploaded during this session.
    pub recent: usize,
}

/// The tasks spawned by one render.
#[must_use = "a render pass does nothing visible until its tasks run"]
pub struct RenderPass {
    pub generation: Generation,
    handles: Vec<JoinHandle<ThumbnailState>>,
}

impl RenderPass {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every task of this pass.
    ///
    /// Returns the produced states in card order. A task that panicked counts
    /// as `Failed`.
    pub async fn finished(self) -> Vec<ThumbnailState> {
        join_all(self.handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap_or(ThumbnailState::Failed))
            .collect()
    }
}

/// Outcome of [`Gallery::upload`].
#[must_use]
pub struct Upload {
    pub report: IngestReport,
    /// `None` for an empty batch, which changes nothing.
    pub render: Option<RenderPass>,
}

pub struct Gallery<R: PdfRenderer + 'static> {
    config: GalleryConfig,
    registry: Registry,
    resources: Rc<ResourceStore>,
    grid: Rc<RefCell<CardGrid>>,
    viewer: ViewerController,
    ingestor: UploadIngestor,
    renderer: Rc<R>,
    notifier: Box<dyn Notifier>,
    upload_dialog_open: bool,
    uploads_this_session: usize,
}

impl<R: PdfRenderer + 'static> Gallery<R> {
    pub fn new(config: GalleryConfig, renderer: R) -> Self {
        Self {
            ingestor: UploadIngestor::new(&config.upload),
            config,
            registry: Registry::new(),
            resources: Rc::new(ResourceStore::new()),
            grid: Rc::new(RefCell::new(CardGrid::new())),
            viewer: ViewerController::new(),
            renderer: Rc::new(renderer),
            notifier: Box::new(TracingNotifier),
            upload_dialog_open: false,
            uploads_this_session: 0,
        }
    }

    /// Replace the sink for user-visible rejection messages.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Prepend the host's preloaded documents and render. Allowed once.
    pub fn hydrate(
        &mut self,
        descriptors: impl IntoIterator<Item = PreloadedDocument>,
    ) -> Result<RenderPass, GalleryError> {
        let added = self.registry.hydrate(descriptors)?;
        tracing::info!(documents = added, "hydrated preloaded documents");
        Ok(self.render())
    }

    /// [`hydrate`](Self::hydrate) from a raw host value.
    ///
    /// A non-array value hydrates with nothing.
    pub fn hydrate_from_value(&mut self, value: &serde_json::Value) -> Result<RenderPass, GalleryError> {
        self.hydrate(parse_descriptors(value))
    }

    /// Ingest a batch of dropped or picked files.
    ///
    /// Each rejection is reported through the notifier. A non-empty batch
    /// re-renders the full registry and closes the upload dialog, even when
    /// every candidate was rejected. An empty batch is a no-op.
    pub fn upload(&mut self, candidates: impl IntoIterator<Item = FileCandidate>) -> Upload {
        let candidates: Vec<FileCandidate> = candidates.into_iter().collect();
        if candidates.is_empty() {
            return Upload {
                report: IngestReport::default(),
                render: None,
            };
        }

        let report = self
            .ingestor
            .ingest(candidates, &mut self.registry, &self.resources);
        for rejection in &report.rejected {
            self.notifier.notify(&rejection.to_string());
        }
        self.uploads_this_session += report.accepted.len();

        let render = self.render();
        self.upload_dialog_open = false;
        Upload {
            report,
            render: Some(render),
        }
    }

    /// Rebuild the grid from the whole registry.
    pub fn render(&mut self) -> RenderPass {
        let snapshot = self.registry.snapshot();
        self.render_documents(snapshot)
    }

    /// Rebuild the grid from the documents whose name contains `needle`.
    pub fn search(&mut self, needle: &str) -> RenderPass {
        let matches = self.registry.query(needle).to_vec();
        tracing::debug!(needle, matches = matches.len(), "search");
        self.render_documents(matches)
    }

    fn render_documents(&mut self, documents: Vec<Document>) -> RenderPass {
        // Every card is Loading before the first task gets to run.
        let generation = self.grid.borrow_mut().rebuild(documents.clone());

        let handles = documents
            .into_iter()
            .map(|document| {
                let task = ThumbnailTask {
                    ticket: RenderTicket::new(generation, document.id),
                    document,
                    renderer: Rc::clone(&self.renderer),
                    resources: Rc::clone(&self.resources),
                    grid: Rc::downgrade(&self.grid),
                    target_width: self.config.thumbnails.target_width,
                };
                tokio::task::spawn_local(task.run())
            })
            .collect();

        RenderPass {
            generation,
            handles,
        }
    }

    /// Show a document in the viewer.
    pub fn open(&mut self, id: DocumentId) -> Result<(), GalleryError> {
        let document = self
            .registry
            .get(id)
            .ok_or(GalleryError::UnknownDocument(id))?;
        self.viewer.open(document);
        Ok(())
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    pub fn open_upload_dialog(&mut self) {
        self.upload_dialog_open = true;
    }

    pub fn close_upload_dialog(&mut self) {
        self.upload_dialog_open = false;
    }

    pub fn is_upload_dialog_open(&self) -> bool {
        self.upload_dialog_open
    }

    pub fn stats(&self) -> GalleryStats {
        GalleryStats {
            total: self.registry.count(),
            recent: self.uploads_this_session,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    /// Borrow the grid. Do not hold the guard across an await.
    pub fn grid(&self) -> Ref<'_, CardGrid> {
        self.grid.borrow()
    }

    pub fn viewer(&self) -> &ViewerController {
        &self.viewer
    }

    /// Page unload: close the viewer, drop the cards and revoke every
    /// uploaded document's handle.
    ///
    /// Returns the number of handles released by this call. Calling it again
    /// releases nothing.
    pub fn dispose(&mut self) -> usize {
        self.viewer.close();
        self.grid.borrow_mut().clear();
        let released = self
            .registry
            .iter()
            .filter(|d| d.owns_resource())
            .filter(|d| self.resources.revoke(&d.resource_url))
            .count();
        tracing::debug!(released, "gallery disposed");
        released
    }
}
