//! Process-wide tracing setup for native hosts.

use crate::console_layer::ConsoleLayer;
use companion_core::{CompanionError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides `default_filter`. Formatted output goes to stderr;
/// when `console` is given, events are also forwarded to its channel.
pub fn init_tracing(default_filter: &str, console: Option<ConsoleLayer>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(console)
        .try_init()
        .map_err(|e| CompanionError::internal(format!("Failed to initialize tracing: {}", e)))
}

/// Installs a subscriber that only forwards events to `console`.
///
/// Used by interactive hosts that print captured events themselves.
pub fn init_console_tracing(default_filter: &str, console: ConsoleLayer) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()
        .map_err(|e| CompanionError::internal(format!("Failed to initialize tracing: {}", e)))
}
