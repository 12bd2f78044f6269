//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the card table. It avoids
//! widget/layout frameworks and instead renders into a simple framebuffer
//! that can be flushed to a terminal backend.
//!
//! - [`GameView`] turns a `GameSnapshot` plus the [`TermPresenter`] cues into
//!   a [`FrameBuffer`] (pure, unit-tested)
//! - [`TerminalRenderer`] diffs and flushes framebuffers through crossterm

pub mod fb;
pub mod game_view;
pub mod presenter;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use presenter::{Cue, TermPresenter};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
