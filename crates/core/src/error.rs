//! Error types for session construction and card selection.

use thiserror::Error;

use crate::types::RejectReason;

/// Invalid game configuration. Raised when a session is built, never mid-game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("deck needs at least {min} cards, got {got}")]
    TooFewCards { min: usize, got: usize },

    #[error("deck has an odd number of cards ({0})")]
    OddCardCount(usize),

    #[error("symbol `{symbol}` appears {count} times, expected exactly 2")]
    UnpairedSymbol { symbol: String, count: usize },

    #[error("star thresholds must be non-decreasing, got {three}/{two}/{one}")]
    NonMonotonicThresholds { three: u32, two: u32, one: u32 },

    #[error("{0} must be greater than zero")]
    ZeroDelay(&'static str),

    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors returned by [`GameSession::select_card`](crate::GameSession::select_card).
///
/// Neither variant disturbs the session: the selection is simply not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The index does not name a slot of the deck.
    #[error("card index {index} out of range for a deck of {len}")]
    OutOfRange { index: usize, len: usize },

    /// The card cannot be selected right now.
    #[error("card {index} not selectable: {reason}")]
    InvalidSelection { index: usize, reason: RejectReason },

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl GameError {
    /// Expected during normal play and safe to ignore silently.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, GameError::InvalidSelection { .. })
    }
}
