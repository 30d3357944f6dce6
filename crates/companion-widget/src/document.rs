//! Host document abstraction.
//!
//! The widget only needs a handful of operations on the page it is embedded
//! in: attach a container with an isolated scope to the body, append nodes
//! inside that scope, and remove the container again.

use companion_core::{CompanionError, Result};

/// Element to be created in the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub tag: &'static str,
    pub id: String,
    pub class: Option<String>,
    /// Inline `style` attribute
    pub style: Option<String>,
}

impl ElementSpec {
    pub fn div(id: impl Into<String>) -> Self {
        Self {
            tag: "div",
            id: id.into(),
            class: None,
            style: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

pub trait HostDocument {
    /// Whether the host can give the widget an isolated subtree.
    fn supports_isolation(&self) -> bool;

    /// Appends `container` to the body and attaches an isolated scope to it.
    fn attach_isolated(&mut self, container: &ElementSpec) -> Result<()>;

    /// Appends an element inside the isolated scope of `container_id`.
    fn append_to_scope(&mut self, container_id: &str, element: &ElementSpec) -> Result<()>;

    /// Appends a `<link rel="stylesheet">` inside the isolated scope.
    fn append_stylesheet(&mut self, container_id: &str, href: &str) -> Result<()>;

    /// Removes a body-level container and its scope. Returns false if absent.
    fn remove(&mut self, container_id: &str) -> bool;

    /// Whether an element with `id` exists at body level.
    fn contains(&self, id: &str) -> bool;
}

/// Node inside an isolated scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeNode {
    Element(ElementSpec),
    Stylesheet(String),
}

#[derive(Debug, Clone)]
struct Container {
    element: ElementSpec,
    scope: Vec<ScopeNode>,
}

/// In-memory document used by the terminal host and tests.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    isolation: bool,
    reject_stylesheets: bool,
    body: Vec<Container>,
    mutations: usize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            isolation: true,
            reject_stylesheets: false,
            body: Vec::new(),
            mutations: 0,
        }
    }

    /// A host without isolated scopes.
    pub fn without_isolation() -> Self {
        Self {
            isolation: false,
            ..Self::new()
        }
    }

    /// A host that refuses stylesheet links, e.g. under a strict CSP.
    pub fn rejecting_stylesheets() -> Self {
        Self {
            reject_stylesheets: true,
            ..Self::new()
        }
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn container(&self, id: &str) -> Option<&ElementSpec> {
        self.find(id).map(|c| &c.element)
    }

    pub fn scope(&self, container_id: &str) -> Option<&[ScopeNode]> {
        self.find(container_id).map(|c| c.scope.as_slice())
    }

    /// Number of successful mutations since creation.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    fn find(&self, id: &str) -> Option<&Container> {
        self.body.iter().find(|c| c.element.id == id)
    }

    fn scope_mut(&mut self, container_id: &str) -> Result<&mut Vec<ScopeNode>> {
        self.body
            .iter_mut()
            .find(|c| c.element.id == container_id)
            .map(|c| &mut c.scope)
            .ok_or_else(|| CompanionError::not_found("Container", container_id))
    }
}

impl HostDocument for MemoryDocument {
    fn supports_isolation(&self) -> bool {
        self.isolation
    }

    fn attach_isolated(&mut self, container: &ElementSpec) -> Result<()> {
        if !self.isolation {
            return Err(CompanionError::unsupported("isolated scopes are not available"));
        }
        if self.contains(&container.id) {
            return Err(CompanionError::dom(format!(
                "element '{}' already exists",
                container.id
            )));
        }
        self.body.push(Container {
            element: container.clone(),
            scope: Vec::new(),
        });
        self.mutations += 1;
        Ok(())
    }

    fn append_to_scope(&mut self, container_id: &str, element: &ElementSpec) -> Result<()> {
        self.scope_mut(container_id)?
            .push(ScopeNode::Element(element.clone()));
        self.mutations += 1;
        Ok(())
    }

    fn append_stylesheet(&mut self, container_id: &str, href: &str) -> Result<()> {
        if self.reject_stylesheets {
            return Err(CompanionError::dom(format!("stylesheet '{}' refused", href)));
        }
        self.scope_mut(container_id)?
            .push(ScopeNode::Stylesheet(href.to_string()));
        self.mutations += 1;
        Ok(())
    }

    fn remove(&mut self, container_id: &str) -> bool {
        let before = self.body.len();
        self.body.retain(|c| c.element.id != container_id);
        let removed = self.body.len() != before;
        if removed {
            self.mutations += 1;
        }
        removed
    }

    fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_append_remove() {
        let mut doc = MemoryDocument::new();
        doc.attach_isolated(&ElementSpec::div("root")).unwrap();
        doc.append_to_scope("root", &ElementSpec::div("mount")).unwrap();
        doc.append_stylesheet("root", "https://example.com/a.css").unwrap();

        assert!(doc.contains("root"));
        assert!(!doc.contains("mount"), "Scope content is not visible at body level");
        assert_eq!(doc.scope("root").unwrap().len(), 2);

        assert!(doc.remove("root"));
        assert!(!doc.remove("root"));
        assert_eq!(doc.body_len(), 0);
        assert_eq!(doc.mutation_count(), 4);
    }

    #[test]
    fn test_duplicate_container_rejected() {
        let mut doc = MemoryDocument::new();
        doc.attach_isolated(&ElementSpec::div("root")).unwrap();
        let err = doc.attach_isolated(&ElementSpec::div("root")).unwrap_err();
        assert!(matches!(err, CompanionError::Dom(_)));
    }

    #[test]
    fn test_append_to_missing_container() {
        let mut doc = MemoryDocument::new();
        let err = doc.append_to_scope("nope", &ElementSpec::div("x")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(doc.mutation_count(), 0);
    }
}
