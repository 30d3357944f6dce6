//! Mind map summaries and node trees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapSummary {
    pub id: u32,
    pub title: String,
    pub node_count: u32,
    pub last_modified: DateTime<Utc>,
    pub thumbnail: String,
}

/// A node placed on the canvas in percent coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl MindMapNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x,
            y,
            color: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    pub id: u32,
    pub title: String,
    pub center_node: MindMapNode,
    pub nodes: Vec<MindMapNode>,
}

impl MindMap {
    /// Nodes attached directly to the center.
    pub fn roots(&self) -> impl Iterator<Item = &MindMapNode> {
        self.nodes.iter().filter(|n| !n.is_child())
    }

    /// Children of `id` that are present on the canvas.
    ///
    /// A node may list child ids that have no node yet; those are skipped.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a MindMapNode> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.parent.as_deref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> MindMap {
        let mut root = MindMapNode::new("active", "Active Recall", 30.0, 30.0);
        root.children = vec!["flashcards".into(), "missing".into()];
        let mut child = MindMapNode::new("flashcards", "Flashcards", 20.0, 20.0);
        child.parent = Some("active".into());
        MindMap {
            id: 1,
            title: "Study".into(),
            center_node: MindMapNode::new("center", "Effective Learning", 50.0, 50.0),
            nodes: vec![root, child],
        }
    }

    #[test]
    fn test_roots_and_children() {
        let map = map();
        let roots: Vec<_> = map.roots().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["active"]);
        let children: Vec<_> = map.children_of("active").map(|n| n.id.as_str()).collect();
        assert_eq!(children, vec!["flashcards"]);
    }
}
