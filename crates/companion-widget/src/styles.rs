//! Stylesheets loaded into the isolated scope.

use crate::document::HostDocument;

pub const FONT_STYLESHEET_URL: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap";

/// Appends stylesheet links to the widget scope.
///
/// The host fetches each stylesheet on its own; nothing waits for it. A link
/// the host refuses is logged and skipped, it never fails initialization.
#[derive(Debug, Clone)]
pub struct StyleLoader {
    stylesheets: Vec<String>,
}

impl Default for StyleLoader {
    fn default() -> Self {
        Self::new(vec![FONT_STYLESHEET_URL.to_string()])
    }
}

impl StyleLoader {
    pub fn new(stylesheets: Vec<String>) -> Self {
        Self { stylesheets }
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// Returns how many links were appended.
    pub fn load(&self, document: &mut dyn HostDocument, container_id: &str) -> usize {
        let mut loaded = 0;
        for href in &self.stylesheets {
            match document.append_stylesheet(container_id, href) {
                Ok(()) => loaded += 1,
                Err(e) => tracing::error!(href = %href, "[StyleLoader] Failed to inject styles: {}", e),
            }
        }
        tracing::debug!(loaded, "[StyleLoader] Styles injected");
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementSpec, MemoryDocument, ScopeNode};

    #[test]
    fn test_loads_font_stylesheet() {
        let mut doc = MemoryDocument::new();
        doc.attach_isolated(&ElementSpec::div("root")).unwrap();

        assert_eq!(StyleLoader::default().load(&mut doc, "root"), 1);
        assert_eq!(
            doc.scope("root").unwrap(),
            &[ScopeNode::Stylesheet(FONT_STYLESHEET_URL.to_string())]
        );
    }

    #[test]
    fn test_refused_stylesheet_is_skipped() {
        let mut doc = MemoryDocument::rejecting_stylesheets();
        doc.attach_isolated(&ElementSpec::div("root")).unwrap();
        assert_eq!(StyleLoader::default().load(&mut doc, "root"), 0);
        assert!(doc.scope("root").unwrap().is_empty());
    }
}
