//! Widget state and its reducer.
//!
//! # Module Structure
//!
//! - `surface`: the menu / panel tagged union
//! - `model`: `WidgetState`
//! - `action`: `WidgetAction` and `WidgetState::apply`

mod action;
mod model;
mod surface;

pub use action::{ActionOutcome, WidgetAction};
pub use model::WidgetState;
pub use surface::{Surface, View};
