//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Independent
//! of any UI framework; the runner decides what an action means on the current
//! screen.

pub mod map;

pub use tui_pairs_types as types;

pub use map::{handle_key_event, should_quit};
