//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (core state machine, terminal rendering, input mapping).
//!
//! # Deck
//!
//! The classic deck has 8 symbols, each appearing exactly twice:
//!
//! - **Cards**: 16 (laid out as a 4x4 grid)
//! - **Symbols**: diamond, paper-plane, anchor, bolt, cube, leaf, bicycle, bomb
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `MS_PER_SECOND` | 1000 | Clock resolution |
//! | `RESOLUTION_DELAY_MS` | 900 | Mismatched pair stays visible before flipping back |
//! | `SETTLE_DELAY_MS` | 450 | Match animation cue before input is accepted again |
//!
//! # Star Rating
//!
//! | Moves | Stars |
//! |-------|-------|
//! | ≤ 12 | 3 |
//! | ≤ 18 | 2 |
//! | ≤ 24 | 1 |
//! | > 24 | 0 |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{CardFace, MoveCounting, SymbolId, CLASSIC_SYMBOLS};
//!
//! let anchor = SymbolId::new("anchor");
//! assert_eq!(anchor.as_str(), "anchor");
//! assert!(CLASSIC_SYMBOLS.contains(&"anchor"));
//!
//! assert!(CardFace::Hidden.is_selectable());
//! assert!(!CardFace::Matched.is_selectable());
//!
//! assert_eq!(MoveCounting::from_str("reveal"), Some(MoveCounting::PerReveal));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Milliseconds per clock second
pub const MS_PER_SECOND: u32 = 1000;

/// Delay before a mismatched pair flips back face-down (900ms)
pub const RESOLUTION_DELAY_MS: u32 = 900;

/// Delay after a non-winning match before new selections are accepted (450ms)
pub const SETTLE_DELAY_MS: u32 = 450;

/// Highest star rating a game can earn
pub const MAX_STARS: u8 = 3;

/// Default move thresholds for 3, 2 and 1 stars
pub const DEFAULT_STAR_THRESHOLDS: [u32; 3] = [12, 18, 24];

/// Smallest playable deck (two pairs)
pub const MIN_CARDS: usize = 4;

/// Classic symbol set; each symbol is dealt twice
pub const CLASSIC_SYMBOLS: [&str; 8] = [
    "diamond",
    "paper-plane",
    "anchor",
    "bolt",
    "cube",
    "leaf",
    "bicycle",
    "bomb",
];

/// Number of grid columns used to lay out a deck of `card_count` cards.
///
/// Picks the smallest column count whose square covers the deck, so 16 cards
/// form a 4x4 grid and 12 cards a 4x3 grid.
///
/// ```
/// use tui_memory_types::grid_columns;
///
/// assert_eq!(grid_columns(16), 4);
/// assert_eq!(grid_columns(12), 4);
/// assert_eq!(grid_columns(4), 2);
/// assert_eq!(grid_columns(0), 1);
/// ```
pub fn grid_columns(card_count: usize) -> usize {
    let mut cols = 1;
    while cols * cols < card_count {
        cols += 1;
    }
    cols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(RESOLUTION_DELAY_MS, 900);
        assert_eq!(SETTLE_DELAY_MS, 450);
        assert_eq!(RESOLUTION_DELAY_MS, SETTLE_DELAY_MS * 2);
    }

    #[test]
    fn default_thresholds_are_monotonic() {
        assert!(DEFAULT_STAR_THRESHOLDS.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn classic_symbols_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for s in CLASSIC_SYMBOLS {
            assert!(seen.insert(s), "duplicate symbol {s}");
        }
    }

    #[test]
    fn grid_columns_covers_deck() {
        for n in 0..64 {
            let cols = grid_columns(n);
            assert!(cols * cols >= n);
        }
    }
}

/// Identifier of the symbol printed on a card.
///
/// Two cards match exactly when their `SymbolId`s are equal; nothing about how a
/// symbol is drawn takes part in the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(String);

impl SymbolId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Face state of a single card
///
/// - **Hidden**: face-down, selectable
/// - **Revealed**: face-up and pending evaluation this turn
/// - **Matched**: paired; terminal for the rest of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardFace {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl CardFace {
    /// Only face-down cards can be selected.
    pub fn is_selectable(&self) -> bool {
        matches!(self, CardFace::Hidden)
    }
}

/// Lifecycle status of one playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
}

/// What counts as one move for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveCounting {
    /// One move per compared pair.
    #[default]
    PerTurn,
    /// One move per accepted card reveal.
    PerReveal,
}

impl MoveCounting {
    /// Parse from a configuration string (case-insensitive)
    ///
    /// Accepts "turn" | "pair" | "perTurn" and "reveal" | "click" | "perReveal".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "turn" | "pair" | "perturn" => Some(MoveCounting::PerTurn),
            "reveal" | "click" | "perreveal" => Some(MoveCounting::PerReveal),
            _ => None,
        }
    }
}

/// Why a selection was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    /// The card is already paired.
    AlreadyMatched,
    /// The card is face-up and pending this turn.
    AlreadyRevealed,
    /// A previous pair is still being resolved.
    Resolving,
    /// The game is over.
    GameWon,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::AlreadyMatched => "already matched",
            RejectReason::AlreadyRevealed => "already revealed",
            RejectReason::Resolving => "pair still resolving",
            RejectReason::GameWon => "game already won",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player actions produced by the input layer
///
/// Cursor movement is a front-end concern; the core only ever sees the card
/// index produced by `Select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the board cursor one column left
    CursorLeft,
    /// Move the board cursor one column right
    CursorRight,
    /// Move the board cursor one row up
    CursorUp,
    /// Move the board cursor one row down
    CursorDown,
    /// Select the card under the cursor
    Select,
    /// Reshuffle and start over
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "select" => Some(GameAction::Select),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }
}
