//! Scoring module - move counting and star rating
//!
//! The rating is a step function of the move count over three configurable
//! thresholds. The tracker only ever lowers it: every recomputation keeps the
//! minimum of the current and newly derived rating.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DEFAULT_STAR_THRESHOLDS, MAX_STARS};

/// Highest move count that still earns 3, 2 and 1 stars respectively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarThresholds {
    pub three: u32,
    pub two: u32,
    pub one: u32,
}

impl StarThresholds {
    pub fn new(three: u32, two: u32, one: u32) -> Result<Self, ConfigError> {
        if three > two || two > one {
            return Err(ConfigError::NonMonotonicThresholds { three, two, one });
        }
        Ok(Self { three, two, one })
    }

    /// Stars earned after `moves` moves
    pub fn stars_for(&self, moves: u32) -> u8 {
        if moves <= self.three {
            3
        } else if moves <= self.two {
            2
        } else if moves <= self.one {
            1
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.three, self.two, self.one).map(|_| ())
    }
}

impl Default for StarThresholds {
    fn default() -> Self {
        let [three, two, one] = DEFAULT_STAR_THRESHOLDS;
        Self { three, two, one }
    }
}

/// Immutable score view handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreState {
    pub move_count: u32,
    pub star_rating: u8,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            move_count: 0,
            star_rating: MAX_STARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    thresholds: StarThresholds,
    state: ScoreState,
}

impl ScoreTracker {
    pub fn new(thresholds: StarThresholds) -> Self {
        let mut tracker = Self {
            thresholds,
            state: ScoreState::default(),
        };
        tracker.recompute();
        tracker
    }

    /// Count one move and re-derive the rating.
    pub fn record_move(&mut self) -> ScoreState {
        self.state.move_count = self.state.move_count.saturating_add(1);
        self.recompute()
    }

    /// Re-derive the rating for the current move count. Never raises it.
    pub fn recompute(&mut self) -> ScoreState {
        let derived = self.thresholds.stars_for(self.state.move_count);
        self.state.star_rating = self.state.star_rating.min(derived);
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ScoreState::default();
        self.recompute();
    }

    pub fn snapshot(&self) -> ScoreState {
        self.state
    }

    pub fn move_count(&self) -> u32 {
        self.state.move_count
    }

    pub fn star_rating(&self) -> u8 {
        self.state.star_rating
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(StarThresholds::default())
    }
}
