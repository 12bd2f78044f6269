use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::engine::WindowKind;
use crate::types::{CardFace, GameStatus, SymbolId, MAX_STARS};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub index: usize,
    pub symbol: SymbolId,
    pub face: CardFace,
}

impl From<&Card> for CardSnapshot {
    fn from(card: &Card) -> Self {
        Self {
            index: card.index(),
            symbol: card.symbol().clone(),
            face: card.face(),
        }
    }
}

/// Read-only view of a session for rendering and serialization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub cards: Vec<CardSnapshot>,
    pub columns: usize,
    pub move_count: u32,
    pub star_rating: u8,
    pub max_stars: u8,
    pub elapsed_seconds: u32,
    pub timer_running: bool,
    pub status: GameStatus,
    pub generation: u32,
    pub resolving: bool,
    pub pending: Vec<usize>,
    pub window: Option<WindowKind>,
    /// Cards flagged by the open window, if any.
    pub marked: Vec<usize>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.columns = 0;
        self.move_count = 0;
        self.star_rating = MAX_STARS;
        self.max_stars = MAX_STARS;
        self.elapsed_seconds = 0;
        self.timer_running = false;
        self.status = GameStatus::InProgress;
        self.generation = 0;
        self.resolving = false;
        self.pending.clear();
        self.window = None;
        self.marked.clear();
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// Input is accepted
    pub fn playable(&self) -> bool {
        !self.is_won() && !self.resolving
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn matched_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.face == CardFace::Matched)
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cards: Vec::new(),
            columns: 0,
            move_count: 0,
            star_rating: 0,
            max_stars: 0,
            elapsed_seconds: 0,
            timer_running: false,
            status: GameStatus::InProgress,
            generation: 0,
            resolving: false,
            pending: Vec::new(),
            window: None,
            marked: Vec::new(),
        };
        s.clear();
        s
    }
}
