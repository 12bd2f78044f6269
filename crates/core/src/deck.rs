//! Deck module - the paired symbol layout for one session
//!
//! The deck owns every [`Card`]. Slot indices are stable for the lifetime of a
//! deal; shuffling rebinds symbols to slots and turns every card face-down.

use std::collections::BTreeMap;

use crate::card::Card;
use crate::error::{ConfigError, GameError};
use crate::rng::SimpleRng;
use crate::types::{CardFace, SymbolId, MIN_CARDS};

/// Ordered card slots; every symbol appears on exactly two of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Lay out `symbols` in the given order without shuffling.
    ///
    /// Fails unless the list is a perfect pairing of at least [`MIN_CARDS`]
    /// cards.
    pub fn new(symbols: &[SymbolId]) -> Result<Self, ConfigError> {
        validate_pairing(symbols)?;
        let cards = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| Card::new(i, s.clone()))
            .collect();
        Ok(Self { cards })
    }

    /// Build a deck that deals each symbol twice, then shuffle it.
    pub fn from_pairs(symbols: &[SymbolId], rng: &mut SimpleRng) -> Result<Self, ConfigError> {
        let doubled: Vec<SymbolId> = symbols
            .iter()
            .flat_map(|s| [s.clone(), s.clone()])
            .collect();
        let mut deck = Self::new(&doubled)?;
        deck.shuffle(rng);
        Ok(deck)
    }

    /// Fisher-Yates shuffle of the slot order; every card ends up `Hidden`.
    pub fn shuffle(&mut self, rng: &mut SimpleRng) {
        rng.shuffle(&mut self.cards);
        self.reset_faces();
    }

    /// Turn every card face-down and renumber slots in place.
    pub fn reset_faces(&mut self) {
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.reset(i);
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_at(&self, index: usize) -> Result<&Card, GameError> {
        self.cards.get(index).ok_or(GameError::OutOfRange {
            index,
            len: self.cards.len(),
        })
    }

    pub(crate) fn card_mut(&mut self, index: usize) -> Result<&mut Card, GameError> {
        let len = self.cards.len();
        self.cards
            .get_mut(index)
            .ok_or(GameError::OutOfRange { index, len })
    }

    /// Symbol bound to a slot
    pub fn symbol_at(&self, index: usize) -> Result<&SymbolId, GameError> {
        self.card_at(index).map(Card::symbol)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// True iff every card is matched
    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }

    pub fn count_faces(&self, face: CardFace) -> usize {
        self.cards.iter().filter(|c| c.face() == face).count()
    }

    /// Pairs not yet matched
    pub fn remaining_pairs(&self) -> usize {
        (self.cards.len() - self.count_faces(CardFace::Matched)) / 2
    }

    /// Number of cards bound to each symbol, in symbol order
    pub fn symbol_counts(&self) -> BTreeMap<&SymbolId, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.symbol()).or_insert(0) += 1;
        }
        counts
    }

    /// Symbols in slot order
    pub fn symbols(&self) -> Vec<SymbolId> {
        self.cards.iter().map(|c| c.symbol().clone()).collect()
    }
}

/// Check that `symbols` is a perfect pairing of a playable size.
pub fn validate_pairing(symbols: &[SymbolId]) -> Result<(), ConfigError> {
    if symbols.len() % 2 != 0 {
        return Err(ConfigError::OddCardCount(symbols.len()));
    }
    if symbols.len() < MIN_CARDS {
        return Err(ConfigError::TooFewCards {
            min: MIN_CARDS,
            got: symbols.len(),
        });
    }

    let mut counts: BTreeMap<&SymbolId, usize> = BTreeMap::new();
    for s in symbols {
        *counts.entry(s).or_insert(0) += 1;
    }
    if let Some((symbol, &count)) = counts.iter().find(|(_, n)| **n != 2) {
        return Err(ConfigError::UnpairedSymbol {
            symbol: symbol.to_string(),
            count,
        });
    }
    Ok(())
}
