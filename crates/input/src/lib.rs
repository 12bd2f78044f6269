//! Terminal input module.
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::GameAction`] and tracks the board cursor that turns
//! `Select` into a card index.

pub mod cursor;
pub mod map;

pub use tui_memory_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit};
