use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Panel views reachable from the floating menu.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum View {
    Discovery,
    Search,
    Chat,
}

impl View {
    /// Header title shown above the panel content.
    pub fn title(&self) -> &'static str {
        match self {
            View::Discovery => "Course Discovery",
            View::Search => "Search Courses",
            View::Chat => "Course Companion",
        }
    }
}

/// What the widget currently shows on top of the host page.
///
/// A panel is always opened from the menu, so `PanelOpen` implies the menu
/// is open beneath it. Closing the menu therefore closes the panel too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "view")]
pub enum Surface {
    /// Only the floating button is visible.
    #[default]
    Closed,
    /// The icon menu is expanded.
    MenuOpen,
    /// A panel shows the given view.
    PanelOpen(View),
}

impl Surface {
    pub fn is_menu_open(&self) -> bool {
        !matches!(self, Surface::Closed)
    }

    pub fn is_panel_open(&self) -> bool {
        matches!(self, Surface::PanelOpen(_))
    }

    pub fn current_view(&self) -> Option<View> {
        match self {
            Surface::PanelOpen(view) => Some(*view),
            _ => None,
        }
    }

    /// The highlighted menu icon, which always follows the open view.
    pub fn active_icon(&self) -> Option<View> {
        self.current_view()
    }

    pub fn toggled_menu(self) -> Surface {
        match self {
            Surface::Closed => Surface::MenuOpen,
            Surface::MenuOpen | Surface::PanelOpen(_) => Surface::Closed,
        }
    }

    pub fn with_panel_closed(self) -> Surface {
        match self {
            Surface::PanelOpen(_) => Surface::MenuOpen,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_menu_round_trip() {
        let surface = Surface::Closed.toggled_menu();
        assert_eq!(surface, Surface::MenuOpen);
        assert_eq!(surface.toggled_menu(), Surface::Closed);
    }

    #[test]
    fn test_closing_menu_closes_panel() {
        let surface = Surface::PanelOpen(View::Chat).toggled_menu();
        assert_eq!(surface, Surface::Closed);
        assert_eq!(surface.current_view(), None);
        assert_eq!(surface.active_icon(), None);
    }

    #[test]
    fn test_close_panel_keeps_menu() {
        let surface = Surface::PanelOpen(View::Search).with_panel_closed();
        assert_eq!(surface, Surface::MenuOpen);
        assert_eq!(Surface::Closed.with_panel_closed(), Surface::Closed);
    }

    #[test]
    fn test_view_titles() {
        assert_eq!(View::Discovery.title(), "Course Discovery");
        assert_eq!("search".parse::<View>().unwrap(), View::Search);
    }
}
