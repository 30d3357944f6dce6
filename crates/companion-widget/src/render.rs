//! Render roots mounted into the widget scope.

use companion_application::{
    ChatView, DiscoveryView, MindMapView, NotesView, QuizView, SearchView, WidgetStore,
};
use companion_core::catalog::CourseRepository;
use companion_core::config::WidgetConfig;
use companion_core::state::WidgetState;
use companion_infrastructure::StaticCourseRepository;
use companion_infrastructure::samples::sample_chats;
use std::sync::Arc;

/// Something that draws the widget into a mount point.
pub trait RenderRoot {
    fn mount(&mut self, mount_point: &str, config: &WidgetConfig);

    /// Re-renders with an updated configuration.
    fn render(&mut self, config: &WidgetConfig);

    /// Tears the tree down. Must stop any pending background work.
    fn unmount(&mut self);
}

/// The widget application: one store shared by every panel view.
pub struct WidgetApp {
    store: Arc<WidgetStore>,
    catalog: Arc<dyn CourseRepository>,
    pub discovery: DiscoveryView,
    pub search: SearchView,
    pub chat: ChatView,
    pub notes: NotesView,
    pub quiz: QuizView,
    pub mind_map: MindMapView,
    mount_point: Option<String>,
    renders: usize,
}

impl Default for WidgetApp {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetApp {
    /// Creates the app over the static catalog with the sample chat history.
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(StaticCourseRepository::new()))
    }

    pub fn with_catalog(catalog: Arc<dyn CourseRepository>) -> Self {
        let store = Arc::new(WidgetStore::new());
        store.restore_chats(sample_chats());
        Self {
            discovery: DiscoveryView::new(Arc::clone(&store), Arc::clone(&catalog)),
            search: SearchView::new(Arc::clone(&store), Arc::clone(&catalog)),
            chat: ChatView::new(Arc::clone(&store)),
            notes: NotesView::new(),
            quiz: QuizView::new(),
            mind_map: MindMapView::new(),
            store,
            catalog,
            mount_point: None,
            renders: 0,
        }
    }

    pub fn store(&self) -> &Arc<WidgetStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Arc<dyn CourseRepository> {
        &self.catalog
    }

    pub fn state(&self) -> WidgetState {
        self.store.snapshot()
    }

    pub fn mount_point(&self) -> Option<&str> {
        self.mount_point.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount_point.is_some()
    }

    /// How many times the tree was rendered, mount included.
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl RenderRoot for WidgetApp {
    fn mount(&mut self, mount_point: &str, config: &WidgetConfig) {
        self.mount_point = Some(mount_point.to_string());
        self.render(config);
        tracing::debug!(mount_point, "[WidgetApp] Mounted");
    }

    fn render(&mut self, config: &WidgetConfig) {
        self.store.init_widget(config.clone());
        self.renders += 1;
    }

    fn unmount(&mut self) {
        self.discovery.shutdown();
        self.chat.shutdown();
        self.mount_point = None;
        tracing::debug!("[WidgetApp] Unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::config::Theme;

    #[test]
    fn test_mount_copies_config_into_store() {
        let mut app = WidgetApp::new();
        assert_eq!(app.state().chats.len(), 4);

        let config = WidgetConfig {
            user_id: Some("user-7".into()),
            theme: Theme::Dark,
            ..WidgetConfig::default()
        };
        app.mount("mount", &config);

        let state = app.state();
        assert_eq!(state.user_id.as_deref(), Some("user-7"));
        assert_eq!(state.config.theme, Theme::Dark);
        assert_eq!(app.render_count(), 1);
        assert!(app.is_mounted());

        app.unmount();
        assert!(!app.is_mounted());
        assert!(app.chat.scheduler().is_shut_down());
    }
}
