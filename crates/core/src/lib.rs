//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the memory game. It has no dependency on a
//! terminal, a clock or any I/O:
//!
//! - **Deterministic**: the same seed deals the same deck
//! - **Tick-driven**: time only advances through [`GameSession::tick`]
//! - **Presenter-agnostic**: all output goes through the sink traits in [`sink`]
//!
//! # Module Structure
//!
//! - [`card`]: one card slot and its face transitions
//! - [`deck`]: the paired layout, Fisher-Yates shuffle, pairing validation
//! - [`engine`]: the turn state machine and its resolution windows
//! - [`scoring`]: move counting and the non-increasing star rating
//! - [`timer`]: the per-second game clock
//! - [`session`]: one owned game composing all of the above
//! - [`config`]: symbol set, thresholds and delays, with env overrides
//!
//! # Game Rules
//!
//! - Every symbol sits on exactly two cards
//! - A turn reveals two cards; equal symbols stay up as a matched pair
//! - A mismatched pair flips back after the resolution delay
//! - Input is rejected while a pair is resolving
//! - The game is won once every card is matched
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{GameConfig, GameSession, TurnOutcome};
//!
//! let config = GameConfig::default().with_fixed_layout(&["a", "b", "a", "b"]);
//! let mut game = GameSession::headless(config).unwrap();
//!
//! game.select_card(0).unwrap();
//! let outcome = game.select_card(2).unwrap();
//! assert!(matches!(outcome, TurnOutcome::Matched { won: false, .. }));
//!
//! // Let the settle window close, then finish the board.
//! game.tick(450);
//! game.select_card(1).unwrap();
//! game.select_card(3).unwrap();
//! assert!(game.is_won());
//! assert_eq!(game.score().move_count, 2);
//! ```
//!
//! # Timing
//!
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Resolution Delay**: 900ms before a mismatched pair flips back
//! - **Settle Delay**: 450ms after a non-winning match
//!
//! Call [`GameSession::tick`] every frame with elapsed time.

pub mod card;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod sink;
pub mod snapshot;
pub mod timer;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use card::Card;
pub use config::GameConfig;
pub use deck::{validate_pairing, Deck};
pub use engine::{ResolutionToken, TurnOutcome, WindowKind};
pub use error::{ConfigError, GameError};
pub use rng::SimpleRng;
pub use scoring::{ScoreState, ScoreTracker, StarThresholds};
pub use session::GameSession;
pub use sink::{
    ClockSink, CompletionSink, EventLog, GameSummary, NullPresenter, Presenter, PresenterEvent,
    RenderSink, ScoreSink,
};
pub use snapshot::{CardSnapshot, GameSnapshot};
pub use timer::{ClockReading, Timer};
