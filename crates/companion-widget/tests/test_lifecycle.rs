use companion_core::config::{Position, Theme};
use companion_execution::{ConsoleEvent, ConsoleLayer};
use companion_widget::document::ScopeNode;
use companion_widget::injector::{CONTAINER_ID, MOUNT_POINT_ID};
use companion_widget::styles::FONT_STYLESHEET_URL;
use companion_widget::{CourseCompanionWidget, Lifecycle, MemoryDocument, WidgetApp};
use companion_application::views::BOT_REPLY_DELAY;
use companion_core::catalog::SelectedCourse;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::layer::SubscriberExt;

fn widget() -> CourseCompanionWidget<MemoryDocument, WidgetApp> {
    CourseCompanionWidget::new(MemoryDocument::new(), WidgetApp::new)
}

fn drain(receiver: &mut UnboundedReceiver<ConsoleEvent>) -> Vec<ConsoleEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn test_init_builds_isolated_tree() {
    let mut widget = widget();
    assert_eq!(widget.lifecycle(), Lifecycle::Uninitialized);

    widget.init(&json!({ "userId": "user-1", "theme": "dark", "locale": "fr" }));
    assert!(widget.is_initialized());

    let doc = widget.document();
    assert_eq!(doc.body_len(), 1);
    assert_eq!(
        doc.scope(CONTAINER_ID).unwrap(),
        &[
            ScopeNode::Stylesheet(FONT_STYLESHEET_URL.to_string()),
            ScopeNode::Element(
                companion_widget::ElementSpec::div(MOUNT_POINT_ID).with_class("coursecompanion-widget")
            ),
        ]
    );

    let config = widget.get_config().unwrap();
    assert_eq!(config.user_id.as_deref(), Some("user-1"));
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.position, Position::BottomRight);
    assert_eq!(config.extra["locale"], json!("fr"));

    let app = widget.root().unwrap();
    assert_eq!(app.mount_point(), Some(MOUNT_POINT_ID));
    assert_eq!(app.state().user_id.as_deref(), Some("user-1"));
}

#[test]
fn test_double_init_warns_and_keeps_first_config() {
    let (layer, mut receiver) = ConsoleLayer::channel();
    let subscriber = tracing_subscriber::registry().with(layer);
    let mut widget = widget();

    tracing::subscriber::with_default(subscriber, || {
        widget.init(&json!({ "userId": "first" }));
        widget.init(&json!({ "userId": "second" }));
    });

    assert_eq!(widget.get_config().unwrap().user_id.as_deref(), Some("first"));
    assert_eq!(widget.document().body_len(), 1);
    assert!(drain(&mut receiver)
        .iter()
        .any(|e| e.is_warning() && e.message.contains("already initialized")));
}

#[test]
fn test_unsupported_host_is_left_untouched() {
    let (layer, mut receiver) = ConsoleLayer::channel();
    let subscriber = tracing_subscriber::registry().with(layer);
    let mut widget = CourseCompanionWidget::new(MemoryDocument::without_isolation(), WidgetApp::new);

    tracing::subscriber::with_default(subscriber, || widget.init(&json!({})));

    assert!(!widget.is_initialized());
    assert!(widget.get_config().is_none());
    assert_eq!(widget.document().mutation_count(), 0);
    assert!(drain(&mut receiver).iter().any(ConsoleEvent::is_error));
}

#[test]
fn test_invalid_init_config_does_not_inject() {
    let mut widget = widget();
    widget.init(&json!({ "position": "middle" }));
    assert!(!widget.is_initialized());
    assert_eq!(widget.document().mutation_count(), 0);
}

#[test]
fn test_refused_stylesheet_does_not_fail_init() {
    let mut widget = CourseCompanionWidget::new(MemoryDocument::rejecting_stylesheets(), WidgetApp::new);
    widget.init(&json!({}));
    assert!(widget.is_initialized());
    assert_eq!(widget.document().scope(CONTAINER_ID).unwrap().len(), 1);
}

#[test]
fn test_destroy_then_reinit() {
    let mut widget = widget();
    widget.init(&json!({ "userId": "a" }));
    widget.destroy();

    assert_eq!(widget.lifecycle(), Lifecycle::Destroyed);
    assert_eq!(widget.document().body_len(), 0);
    assert!(widget.get_config().is_none());
    assert!(widget.root().is_none());

    widget.destroy();
    assert_eq!(widget.lifecycle(), Lifecycle::Destroyed);

    widget.init(&json!({ "userId": "b" }));
    assert!(widget.is_initialized());
    assert_eq!(widget.document().body_len(), 1);
    assert_eq!(widget.get_config().unwrap().user_id.as_deref(), Some("b"));
}

#[test]
fn test_update_config_before_init_is_rejected() {
    let (layer, mut receiver) = ConsoleLayer::channel();
    let subscriber = tracing_subscriber::registry().with(layer);
    let mut widget = widget();

    tracing::subscriber::with_default(subscriber, || {
        widget.update_config(&json!({ "theme": "dark" }));
    });

    assert!(widget.get_config().is_none());
    assert_eq!(widget.lifecycle(), Lifecycle::Uninitialized);
    assert!(drain(&mut receiver).iter().any(ConsoleEvent::is_warning));
}

#[test]
fn test_update_config_merges_and_rerenders() {
    let mut widget = widget();
    widget.init(&json!({ "userId": "u", "theme": "dark" }));

    widget.update_config(&json!({ "position": "top-left" }));
    let config = widget.get_config().unwrap();
    assert_eq!(config.user_id.as_deref(), Some("u"));
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.position, Position::TopLeft);

    let app = widget.root().unwrap();
    assert_eq!(app.render_count(), 2);
    assert_eq!(app.state().config.position, Position::TopLeft);

    widget.update_config(&json!({ "theme": "blue" }));
    assert_eq!(widget.get_config().unwrap(), config);
    assert_eq!(widget.root().unwrap().render_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_pending_reply_does_not_fire_after_destroy() {
    let mut widget = widget();
    widget.init(&json!({}));

    let store = {
        let app = widget.root().unwrap();
        let store = Arc::clone(app.store());
        store.add_course(SelectedCourse::new("py101", "Python Fundamentals"));
        app.chat.start_new_chat(None);
        assert!(app.chat.send_message("Hello?"));
        store
    };

    widget.destroy();
    tokio::time::sleep(BOT_REPLY_DELAY * 2).await;

    assert_eq!(store.snapshot().messages.len(), 2);
}
