pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod panel;
pub mod state;

// Re-export common error type
pub use error::{CompanionError, Result};
