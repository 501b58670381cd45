//! The single modal viewer.
//!
//! At most one document is displayed at a time. Opening binds the display
//! surface to the document's resource URL; closing hides the modal and clears
//! the binding. The viewer never touches the registry and never revokes the
//! handle it displayed.

use crate::types::{Document, ResourceUrl};

#[derive(Debug, Default)]
pub struct ViewerController {
    current: Option<Document>,
    binding: Option<ResourceUrl>,
    visible: bool,
}

impl ViewerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `document`, replacing whatever was displayed.
    pub fn open(&mut self, document: &Document) {
        tracing::debug!(id = %document.id, name = %document.name, "viewer opened");
        self.binding = Some(document.resource_url.clone());
        self.current = Some(document.clone());
        self.visible = true;
    }

    /// Hide the modal and clear the display binding. Idempotent.
    pub fn close(&mut self) {
        if self.visible {
            tracing::debug!("viewer closed");
        }
        self.visible = false;
        self.binding = None;
        self.current = None;
    }

    /// Title text: the document name, or empty when nothing is open.
    pub fn title(&self) -> &str {
        self.current.as_ref().map_or("", |d| d.name.as_str())
    }

    pub fn binding(&self) -> Option<&ResourceUrl> {
        self.binding.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current(&self) -> Option<&Document> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::uploaded;

    #[test]
    fn open_binds_document_url() {
        let mut viewer = ViewerController::new();
        let doc = uploaded("report.pdf");
        viewer.open(&doc);

        assert!(viewer.is_visible());
        assert_eq!(viewer.title(), "report.pdf");
        assert_eq!(viewer.binding(), Some(&doc.resource_url));
    }

    #[test]
    fn open_replaces_previous_document() {
        let mut viewer = ViewerController::new();
        let first = uploaded("first.pdf");
        let second = uploaded("second.pdf");
        viewer.open(&first);
        viewer.open(&second);

        assert_eq!(viewer.title(), "second.pdf");
        assert_eq!(viewer.binding(), Some(&second.resource_url));
        assert_eq!(viewer.current().map(|d| d.id), Some(second.id));
    }

    #[test]
    fn close_clears_binding() {
        let mut viewer = ViewerController::new();
        viewer.open(&uploaded("a.pdf"));
        viewer.close();

        assert!(!viewer.is_visible());
        assert!(viewer.binding().is_none());
        assert_eq!(viewer.title(), "");
    }

    #[test]
    fn close_without_open_is_harmless() {
        let mut viewer = ViewerController::new();
        viewer.close();
        viewer.close();
        assert!(!viewer.is_visible());
        assert!(viewer.binding().is_none());
    }
}
