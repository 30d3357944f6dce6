//! Isolated container for the widget.

use crate::document::{ElementSpec, HostDocument};
use companion_core::Result;

pub const CONTAINER_ID: &str = "coursecompanion-widget-root";
pub const CONTAINER_CLASS: &str = "coursecompanion-widget";
/// Clicks outside the widget's own elements pass through to the page.
pub const CONTAINER_STYLE: &str = "position: fixed; z-index: 9999; pointer-events: none";
pub const MOUNT_POINT_ID: &str = "coursecompanion-react-root";

/// Creates and removes the widget's container on the host page.
#[derive(Debug, Default)]
pub struct WidgetInjector {
    container_id: Option<String>,
}

impl WidgetInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container_spec() -> ElementSpec {
        ElementSpec::div(CONTAINER_ID)
            .with_class(CONTAINER_CLASS)
            .with_style(CONTAINER_STYLE)
    }

    /// Attaches the container and returns the id of its isolated scope.
    pub fn inject(&mut self, document: &mut dyn HostDocument) -> Result<String> {
        document.attach_isolated(&Self::container_spec())?;
        self.container_id = Some(CONTAINER_ID.to_string());
        tracing::info!("[WidgetInjector] Widget injected");
        Ok(CONTAINER_ID.to_string())
    }

    /// Appends the element the render root mounts into.
    pub fn append_mount_point(&self, document: &mut dyn HostDocument) -> Result<String> {
        let container_id = self.container_id.as_deref().unwrap_or(CONTAINER_ID);
        let mount = ElementSpec::div(MOUNT_POINT_ID).with_class(CONTAINER_CLASS);
        document.append_to_scope(container_id, &mount)?;
        Ok(MOUNT_POINT_ID.to_string())
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    pub fn is_injected(&self, document: &dyn HostDocument) -> bool {
        document.contains(CONTAINER_ID)
    }

    /// Removes the container if this injector created it.
    pub fn destroy(&mut self, document: &mut dyn HostDocument) {
        if let Some(id) = self.container_id.take() {
            if document.remove(&id) {
                tracing::info!("[WidgetInjector] Widget removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, ScopeNode};

    #[test]
    fn test_inject_creates_styled_container() {
        let mut doc = MemoryDocument::new();
        let mut injector = WidgetInjector::new();
        let scope = injector.inject(&mut doc).unwrap();
        injector.append_mount_point(&mut doc).unwrap();

        let container = doc.container(CONTAINER_ID).unwrap();
        assert_eq!(container.class.as_deref(), Some("coursecompanion-widget"));
        assert_eq!(container.style.as_deref(), Some(CONTAINER_STYLE));
        assert!(injector.is_injected(&doc));

        let ScopeNode::Element(mount) = &doc.scope(&scope).unwrap()[0] else {
            panic!("expected the mount point");
        };
        assert_eq!(mount.id, MOUNT_POINT_ID);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut doc = MemoryDocument::new();
        let mut injector = WidgetInjector::new();
        injector.inject(&mut doc).unwrap();
        injector.destroy(&mut doc);
        injector.destroy(&mut doc);
        assert!(!injector.is_injected(&doc));
        assert!(injector.container_id().is_none());
    }
}
