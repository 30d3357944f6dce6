//! Tracing layer that mirrors log events onto a channel.
//!
//! The widget has no user-visible error surface; every precondition
//! violation ends up as a log event. This layer lets a host (the CLI status
//! line, a test) observe those events as data.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// A captured log event.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConsoleEvent {
    /// Module path that emitted the event
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    pub message: String,
    /// Structured fields other than the message
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

impl ConsoleEvent {
    pub fn is_error(&self) -> bool {
        self.level == Level::ERROR.as_str()
    }

    pub fn is_warning(&self) -> bool {
        self.level == Level::WARN.as_str()
    }
}

/// Forwards every event it sees to an unbounded channel.
pub struct ConsoleLayer {
    sender: mpsc::UnboundedSender<ConsoleEvent>,
}

impl ConsoleLayer {
    pub fn new(sender: mpsc::UnboundedSender<ConsoleEvent>) -> Self {
        Self { sender }
    }

    /// Creates a layer together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConsoleEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        let message = match fields.remove("message") {
            Some(Value::String(message)) => message,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let console_event = ConsoleEvent {
            target: event.metadata().target().to_string(),
            level: event.metadata().level().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver may be gone; logging must never fail
        let _ = self.sender.send(console_event);
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_captures_level_message_and_fields() {
        let (layer, mut receiver) = ConsoleLayer::channel();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(chat_id = "chat_9", "Chat not found");
            tracing::info!(count = 3u64, "loaded");
        });

        let error = receiver.try_recv().unwrap();
        assert!(error.is_error());
        assert_eq!(error.message, "Chat not found");
        assert_eq!(error.fields["chat_id"], "chat_9");

        let info = receiver.try_recv().unwrap();
        assert_eq!(info.level, "INFO");
        assert_eq!(info.fields["count"], 3);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (layer, receiver) = ConsoleLayer::channel();
        drop(receiver);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("nobody listens");
        });
    }
}
