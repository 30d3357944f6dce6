pub mod catalog;
pub mod config;
pub mod repl;

use anyhow::Result;
use companion_execution::logging::{DEFAULT_FILTER, init_tracing};

/// Logs to stderr for the one-shot subcommands.
pub fn init_logging() -> Result<()> {
    init_tracing(DEFAULT_FILTER, None)?;
    Ok(())
}
