//! Mind map side panel.

use companion_core::panel::{MindMap, MindMapSummary};
use companion_infrastructure::samples::{mind_map_summaries, sample_mind_map};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MindMapMode {
    #[default]
    List,
    Canvas(MindMap),
}

pub struct MindMapView {
    maps: Vec<MindMapSummary>,
    mode: MindMapMode,
}

impl Default for MindMapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MindMapView {
    pub fn new() -> Self {
        Self {
            maps: mind_map_summaries(),
            mode: MindMapMode::List,
        }
    }

    pub fn maps(&self) -> &[MindMapSummary] {
        &self.maps
    }

    pub fn mode(&self) -> &MindMapMode {
        &self.mode
    }

    /// Opens a map on the canvas. Every listed map shows the bundled tree.
    pub fn view(&mut self, map_id: u32) -> bool {
        let Some(summary) = self.maps.iter().find(|m| m.id == map_id) else {
            return false;
        };
        let mut map = sample_mind_map();
        map.id = summary.id;
        map.title = summary.title.clone();
        self.mode = MindMapMode::Canvas(map);
        true
    }

    pub fn back_to_list(&mut self) {
        self.mode = MindMapMode::List;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_and_back() {
        let mut view = MindMapView::new();
        assert_eq!(view.maps().len(), 3);
        assert!(view.view(3));
        let MindMapMode::Canvas(map) = view.mode() else {
            panic!("expected canvas");
        };
        assert_eq!(map.title, "Study Techniques");
        assert_eq!(map.roots().count(), 4);

        view.back_to_list();
        assert_eq!(view.mode(), &MindMapMode::List);
        assert!(!view.view(99));
    }
}
