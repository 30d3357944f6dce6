//! Embeds the CourseCompanion widget into a host page.
//!
//! # Module Structure
//!
//! - `document`: host document abstraction and an in-memory implementation
//! - `injector`: isolated container and mount point
//! - `styles`: stylesheet loading into the isolated scope
//! - `render`: render root trait and the widget application
//! - `bootstrap`: init / destroy / update_config lifecycle
//! - `web`: browser bindings (wasm32 only)

pub mod bootstrap;
pub mod document;
pub mod injector;
pub mod render;
pub mod styles;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bootstrap::{CourseCompanionWidget, Lifecycle};
pub use document::{ElementSpec, HostDocument, MemoryDocument, ScopeNode};
pub use injector::WidgetInjector;
pub use render::{RenderRoot, WidgetApp};
pub use styles::StyleLoader;
