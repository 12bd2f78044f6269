//! Card module - a single slot of the deck

use serde::{Deserialize, Serialize};

use crate::types::{CardFace, SymbolId};

/// One card on the table.
///
/// The index is the card's slot in the deck and never changes during a
/// session. Face transitions go through the methods below, each of which
/// returns `false` and leaves the card untouched when the transition is not
/// allowed from the current face.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    index: usize,
    symbol: SymbolId,
    face: CardFace,
}

impl Card {
    /// Create a face-down card
    pub fn new(index: usize, symbol: SymbolId) -> Self {
        Self {
            index,
            symbol,
            face: CardFace::Hidden,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn symbol(&self) -> &SymbolId {
        &self.symbol
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn is_matched(&self) -> bool {
        self.face == CardFace::Matched
    }

    /// Same symbol as `other`. Compares identifiers only.
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.symbol == other.symbol
    }

    /// Hidden -> Revealed
    pub(crate) fn reveal(&mut self) -> bool {
        if self.face != CardFace::Hidden {
            return false;
        }
        self.face = CardFace::Revealed;
        true
    }

    /// Revealed -> Hidden
    pub(crate) fn hide(&mut self) -> bool {
        if self.face != CardFace::Revealed {
            return false;
        }
        self.face = CardFace::Hidden;
        true
    }

    /// Revealed -> Matched
    pub(crate) fn mark_matched(&mut self) -> bool {
        if self.face != CardFace::Revealed {
            return false;
        }
        self.face = CardFace::Matched;
        true
    }

    pub(crate) fn reset(&mut self, index: usize) {
        self.index = index;
        self.face = CardFace::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(symbol: &str) -> Card {
        Card::new(0, SymbolId::new(symbol))
    }

    #[test]
    fn test_new_card_is_hidden() {
        let c = card("bolt");
        assert_eq!(c.face(), CardFace::Hidden);
        assert_eq!(c.symbol().as_str(), "bolt");
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_face_lifecycle() {
        let mut c = card("leaf");
        assert!(c.reveal());
        assert_eq!(c.face(), CardFace::Revealed);
        assert!(c.hide());
        assert_eq!(c.face(), CardFace::Hidden);
        assert!(c.reveal());
        assert!(c.mark_matched());
        assert!(c.is_matched());
    }

    #[test]
    fn test_matched_is_terminal() {
        let mut c = card("cube");
        c.reveal();
        c.mark_matched();

        assert!(!c.reveal());
        assert!(!c.hide());
        assert!(!c.mark_matched());
        assert_eq!(c.face(), CardFace::Matched);
    }

    #[test]
    fn test_hidden_cannot_match_or_hide() {
        let mut c = card("bomb");
        assert!(!c.mark_matched());
        assert!(!c.hide());
        assert_eq!(c.face(), CardFace::Hidden);
    }

    #[test]
    fn test_pairs_with_compares_symbol_only() {
        let a = Card::new(0, SymbolId::new("anchor"));
        let b = Card::new(5, SymbolId::new("anchor"));
        let c = Card::new(1, SymbolId::new("anchors"));

        assert!(a.pairs_with(&b));
        assert!(!a.pairs_with(&c));
    }
}
