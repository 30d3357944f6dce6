//! Widget lifecycle.
//!
//! ```text
//! Uninitialized --init--> Initialized --destroy--> Destroyed
//!                              ^                       |
//!                              +--------init-----------+
//! ```
//!
//! Misuse (double init, updates before init, an unsupported host) is
//! reported through `tracing` and leaves the widget as it was.

use crate::document::HostDocument;
use crate::injector::WidgetInjector;
use crate::render::RenderRoot;
use crate::styles::StyleLoader;
use companion_core::config::WidgetConfig;
use serde_json::Value;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Initialized,
    Destroyed,
}

/// Entry point the host page talks to.
pub struct CourseCompanionWidget<D, R> {
    document: D,
    injector: WidgetInjector,
    styles: StyleLoader,
    new_root: Box<dyn FnMut() -> R>,
    root: Option<R>,
    config: Option<WidgetConfig>,
    lifecycle: Lifecycle,
}

impl<D, R> CourseCompanionWidget<D, R>
where
    D: HostDocument,
    R: RenderRoot,
{
    /// `new_root` builds a fresh render root for every `init`.
    pub fn new(document: D, new_root: impl FnMut() -> R + 'static) -> Self {
        Self {
            document,
            injector: WidgetInjector::new(),
            styles: StyleLoader::default(),
            new_root: Box::new(new_root),
            root: None,
            config: None,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn with_styles(mut self, styles: StyleLoader) -> Self {
        self.styles = styles;
        self
    }

    /// Injects the widget into the document and mounts a render root.
    pub fn init(&mut self, patch: &Value) {
        if self.is_initialized() {
            tracing::warn!("[CourseCompanion] Widget is already initialized");
            return;
        }
        if !self.document.supports_isolation() {
            tracing::error!("[CourseCompanion] Isolated DOM scopes are not supported by this host");
            return;
        }

        let config = match WidgetConfig::from_patch(patch) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("[CourseCompanion] Failed to initialize: {}", e);
                return;
            }
        };

        tracing::info!("[CourseCompanion] Initializing widget");
        let scope = match self.injector.inject(&mut self.document) {
            Ok(scope) => scope,
            Err(e) => {
                tracing::error!("[CourseCompanion] Failed to inject widget: {}", e);
                return;
            }
        };

        self.styles.load(&mut self.document, &scope);

        let mount_point = match self.injector.append_mount_point(&mut self.document) {
            Ok(mount_point) => mount_point,
            Err(e) => {
                tracing::error!("[CourseCompanion] Failed to create mount point: {}", e);
                self.injector.destroy(&mut self.document);
                return;
            }
        };

        let mut root = (self.new_root)();
        root.mount(&mount_point, &config);

        tracing::info!(
            user_id = config.user_id.as_deref().unwrap_or("Not set"),
            api_url = %config.api_url,
            "[CourseCompanion] Widget initialized"
        );
        self.root = Some(root);
        self.config = Some(config);
        self.lifecycle = Lifecycle::Initialized;
    }

    /// Unmounts the render root and removes the container.
    pub fn destroy(&mut self) {
        if !self.is_initialized() {
            tracing::debug!(lifecycle = %self.lifecycle, "[CourseCompanion] Nothing to destroy");
            return;
        }
        if let Some(mut root) = self.root.take() {
            root.unmount();
        }
        self.injector.destroy(&mut self.document);
        self.config = None;
        self.lifecycle = Lifecycle::Destroyed;
        tracing::info!("[CourseCompanion] Widget destroyed");
    }

    /// Merges `patch` into the configuration and re-renders.
    pub fn update_config(&mut self, patch: &Value) {
        let (Some(config), Some(root)) = (self.config.as_mut(), self.root.as_mut()) else {
            tracing::warn!("[CourseCompanion] Widget is not initialized; call init() first");
            return;
        };

        // merge validates before touching the stored config
        if let Err(e) = config.merge(patch) {
            tracing::warn!("[CourseCompanion] Configuration update rejected: {}", e);
            return;
        }
        root.render(config);
        tracing::info!("[CourseCompanion] Configuration updated");
    }

    pub fn get_config(&self) -> Option<WidgetConfig> {
        self.config.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn root(&self) -> Option<&R> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut R> {
        self.root.as_mut()
    }
}
