//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into the engine's [`crate::types::Command`]
//! set. Holding a key relies on the terminal's own auto-repeat, the same way
//! a browser repeats `keydown`.

pub mod map;

pub use blockfall_types as types;

pub use map::{command_for_key, should_quit};
