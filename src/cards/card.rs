//! Card model.
//!
//! A card is a deck position carrying one symbol and a visibility state.
//! State starts `Hidden` and is monotonic except for the mismatch path,
//! where an `Exposed` card returns to `Hidden`. `Matched` is terminal.

use serde::{Deserialize, Serialize};

/// Position of a card in the deck. Unique and immutable per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardIndex(pub u16);

impl CardIndex {
    /// Create a new card index.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Opaque symbol identifier. Each symbol appears on exactly two cards.
///
/// The engine doesn't interpret symbols; the host maps them to whatever it
/// renders (emoji, images, glyphs).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u16);

impl SymbolId {
    /// Create a new symbol ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Visibility state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face-down.
    #[default]
    Hidden,
    /// Face-up, awaiting comparison.
    Exposed,
    /// Locked in as part of a settled pair. Terminal.
    Matched,
}

/// A card in a session's deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// 0-based deck position.
    pub index: CardIndex,

    /// The symbol this card carries.
    pub symbol: SymbolId,

    state: CardState,
}

impl Card {
    /// Create a hidden card.
    #[must_use]
    pub fn new(index: CardIndex, symbol: SymbolId) -> Self {
        Self {
            index,
            symbol,
            state: CardState::Hidden,
        }
    }

    /// Current visibility state.
    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Check if the card is face-down.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }

    /// Check if the card is face-up awaiting comparison.
    #[must_use]
    pub fn is_exposed(&self) -> bool {
        self.state == CardState::Exposed
    }

    /// Check if the card is locked in.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    pub(crate) fn set_state(&mut self, state: CardState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_starts_hidden() {
        let card = Card::new(CardIndex::new(3), SymbolId::new(1));

        assert_eq!(card.index, CardIndex::new(3));
        assert_eq!(card.symbol, SymbolId::new(1));
        assert_eq!(card.state(), CardState::Hidden);
        assert!(card.is_hidden());
        assert!(!card.is_exposed());
        assert!(!card.is_matched());
    }

    #[test]
    fn test_state_transitions() {
        let mut card = Card::new(CardIndex::new(0), SymbolId::new(0));

        card.set_state(CardState::Exposed);
        assert!(card.is_exposed());

        card.set_state(CardState::Matched);
        assert!(card.is_matched());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardIndex::new(5)), "Card(5)");
        assert_eq!(format!("{}", SymbolId::new(2)), "Symbol(2)");
    }

    #[test]
    fn test_card_serde() {
        let card = Card::new(CardIndex::new(1), SymbolId::new(4));
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
