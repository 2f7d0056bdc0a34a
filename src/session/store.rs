//! Card state store.
//!
//! Pure mapping from card index to visibility state, plus the derived queue
//! of currently exposed cards. No timers live here; settlement timing is the
//! resolver's business. Each mutation is a single atomic transition.
//!
//! Invariants:
//! - at most two cards are `Exposed` at any instant
//! - a card never leaves `Matched`
//! - `Exposed → Hidden` happens only through `settle_as_mismatch`

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{Card, CardIndex, CardState, SymbolId};
use crate::core::RejectReason;

/// A comparison's two candidate cards.
pub type CardPair = [CardIndex; 2];

/// Holds the per-card visibility state for one session.
#[derive(Clone, Debug)]
pub struct CardStore {
    cards: Vec<Card>,
    exposed: SmallVec<[CardIndex; 2]>,
}

impl CardStore {
    /// Create a store over a freshly built deck.
    #[must_use]
    pub fn new(deck: Vec<Card>) -> Self {
        Self {
            cards: deck,
            exposed: SmallVec::new(),
        }
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get a card by index.
    #[must_use]
    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index.raw() as usize)
    }

    /// Iterate over all cards in deck order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The indices currently exposed, in exposure order.
    #[must_use]
    pub fn exposed(&self) -> &[CardIndex] {
        &self.exposed
    }

    /// The two comparison candidates, if two cards are exposed.
    #[must_use]
    pub fn exposed_pair(&self) -> Option<CardPair> {
        match self.exposed.as_slice() {
            &[first, second] => Some([first, second]),
            _ => None,
        }
    }

    /// Count of cards locked in as matched.
    #[must_use]
    pub fn matched_card_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched()).count()
    }

    /// Turn a hidden card face-up and append it to the exposed queue.
    ///
    /// Rejects without side effects if the index is out of bounds, the card
    /// is already exposed or matched, or two cards are already exposed and
    /// unresolved.
    pub fn expose(&mut self, index: CardIndex) -> Result<(), RejectReason> {
        let card = self
            .cards
            .get(index.raw() as usize)
            .ok_or(RejectReason::OutOfBounds)?;

        match card.state() {
            CardState::Exposed => return Err(RejectReason::AlreadyExposed),
            CardState::Matched => return Err(RejectReason::AlreadyMatched),
            CardState::Hidden => {}
        }
        if self.exposed.len() >= 2 {
            return Err(RejectReason::Locked);
        }

        self.cards[index.raw() as usize].set_state(CardState::Exposed);
        self.exposed.push(index);
        Ok(())
    }

    /// Commit the two exposed cards as matched and clear the queue.
    pub fn settle_as_matched(&mut self, pair: CardPair) {
        for index in pair {
            debug_assert!(self.cards[index.raw() as usize].is_exposed());
            self.cards[index.raw() as usize].set_state(CardState::Matched);
        }
        self.exposed.clear();
    }

    /// Return the two exposed cards to hidden and clear the queue.
    pub fn settle_as_mismatch(&mut self, pair: CardPair) {
        for index in pair {
            debug_assert!(self.cards[index.raw() as usize].is_exposed());
            self.cards[index.raw() as usize].set_state(CardState::Hidden);
        }
        self.exposed.clear();
    }

    /// Find a still-findable pair: a symbol with exactly two hidden cards.
    ///
    /// Recomputed on demand by grouping hidden cards by symbol; O(deck size).
    /// Picks the lowest symbol ID so the choice is deterministic. Returns
    /// `None` only when a lone hidden card remains while its partner is
    /// exposed, or when nothing is hidden at all.
    #[must_use]
    pub fn hidden_pair(&self) -> Option<CardPair> {
        let mut by_symbol: FxHashMap<SymbolId, SmallVec<[CardIndex; 2]>> = FxHashMap::default();
        for card in &self.cards {
            if card.is_hidden() {
                by_symbol.entry(card.symbol).or_default().push(card.index);
            }
        }

        by_symbol
            .into_iter()
            .filter(|(_, members)| members.len() == 2)
            .min_by_key(|(symbol, _)| *symbol)
            .map(|(_, members)| [members[0], members[1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_deck(symbols: &[u16]) -> Vec<Card> {
        symbols
            .iter()
            .enumerate()
            .map(|(i, &s)| Card::new(CardIndex::new(i as u16), SymbolId::new(s)))
            .collect()
    }

    fn store_xyxy() -> CardStore {
        CardStore::new(fixed_deck(&[0, 1, 0, 1]))
    }

    #[test]
    fn test_expose_appends_in_order() {
        let mut store = store_xyxy();

        store.expose(CardIndex::new(2)).unwrap();
        store.expose(CardIndex::new(0)).unwrap();

        assert_eq!(store.exposed(), &[CardIndex::new(2), CardIndex::new(0)]);
        assert_eq!(
            store.exposed_pair(),
            Some([CardIndex::new(2), CardIndex::new(0)])
        );
    }

    #[test]
    fn test_expose_out_of_bounds() {
        let mut store = store_xyxy();
        assert_eq!(
            store.expose(CardIndex::new(4)),
            Err(RejectReason::OutOfBounds)
        );
        assert!(store.exposed().is_empty());
    }

    #[test]
    fn test_expose_same_card_twice_rejected() {
        let mut store = store_xyxy();
        store.expose(CardIndex::new(0)).unwrap();

        assert_eq!(
            store.expose(CardIndex::new(0)),
            Err(RejectReason::AlreadyExposed)
        );
        assert_eq!(store.exposed().len(), 1);
    }

    #[test]
    fn test_expose_third_card_rejected() {
        let mut store = store_xyxy();
        store.expose(CardIndex::new(0)).unwrap();
        store.expose(CardIndex::new(1)).unwrap();

        assert_eq!(store.expose(CardIndex::new(3)), Err(RejectReason::Locked));
        assert_eq!(store.exposed().len(), 2);
    }

    #[test]
    fn test_settle_as_matched() {
        let mut store = store_xyxy();
        store.expose(CardIndex::new(0)).unwrap();
        store.expose(CardIndex::new(2)).unwrap();

        store.settle_as_matched([CardIndex::new(0), CardIndex::new(2)]);

        assert!(store.card(CardIndex::new(0)).unwrap().is_matched());
        assert!(store.card(CardIndex::new(2)).unwrap().is_matched());
        assert!(store.exposed().is_empty());
        assert_eq!(store.matched_card_count(), 2);
    }

    #[test]
    fn test_settle_as_mismatch_round_trips_to_hidden() {
        let mut store = store_xyxy();
        store.expose(CardIndex::new(0)).unwrap();
        store.expose(CardIndex::new(1)).unwrap();

        store.settle_as_mismatch([CardIndex::new(0), CardIndex::new(1)]);

        assert!(store.card(CardIndex::new(0)).unwrap().is_hidden());
        assert!(store.card(CardIndex::new(1)).unwrap().is_hidden());
        assert!(store.exposed().is_empty());
    }

    #[test]
    fn test_matched_card_cannot_be_exposed() {
        let mut store = store_xyxy();
        store.expose(CardIndex::new(0)).unwrap();
        store.expose(CardIndex::new(2)).unwrap();
        store.settle_as_matched([CardIndex::new(0), CardIndex::new(2)]);

        assert_eq!(
            store.expose(CardIndex::new(0)),
            Err(RejectReason::AlreadyMatched)
        );
    }

    #[test]
    fn test_hidden_pair_prefers_lowest_symbol() {
        let store = CardStore::new(fixed_deck(&[1, 0, 1, 0]));

        let pair = store.hidden_pair().unwrap();
        let symbol = store.card(pair[0]).unwrap().symbol;
        assert_eq!(symbol, SymbolId::new(0));
        assert_eq!(pair, [CardIndex::new(1), CardIndex::new(3)]);
    }

    #[test]
    fn test_hidden_pair_skips_exposed_partner() {
        // Symbol 0 has one card exposed; only symbol 1 is fully hidden.
        let mut store = store_xyxy();
        store.expose(CardIndex::new(0)).unwrap();

        let pair = store.hidden_pair().unwrap();
        assert_eq!(store.card(pair[0]).unwrap().symbol, SymbolId::new(1));
    }

    #[test]
    fn test_hidden_pair_none_when_last_pair_split() {
        // Both symbol-1 cards matched, one symbol-0 card exposed: no symbol
        // has two hidden members.
        let mut store = store_xyxy();
        store.expose(CardIndex::new(1)).unwrap();
        store.expose(CardIndex::new(3)).unwrap();
        store.settle_as_matched([CardIndex::new(1), CardIndex::new(3)]);
        store.expose(CardIndex::new(0)).unwrap();

        assert_eq!(store.hidden_pair(), None);
    }
}
