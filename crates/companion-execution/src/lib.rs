//! Runtime services: delayed replies and log capture.

pub mod console_layer;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod scheduler;

pub use console_layer::{ConsoleEvent, ConsoleLayer};
pub use scheduler::ReplyScheduler;
