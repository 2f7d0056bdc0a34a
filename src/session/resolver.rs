//! Match resolver state machine.
//!
//! `Idle` (0 or 1 cards exposed, accepting input) transitions to `Comparing`
//! the instant a second card is exposed, and back to `Idle` when the pending
//! comparison settles. While `Comparing` the session is locked: no new
//! comparison can begin before the pending one has settled, which gives a
//! strict happens-before order between comparisons.
//!
//! The resolver decides the outcome immediately but holds it unsettled until
//! the controller's scheduled task fires, so the visible consequence lands
//! after the configured presentation delay.

use serde::{Deserialize, Serialize};

use crate::cards::CardState;

use super::store::{CardPair, CardStore};

/// Outcome of comparing two exposed cards' symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOutcome {
    /// Symbols equal; the pair will lock in.
    Matched,
    /// Symbols differ; both cards will return to hidden.
    Mismatched,
}

/// A comparison awaiting settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingComparison {
    /// The two exposed candidates, in exposure order.
    pub pair: CardPair,
    /// The already-decided outcome.
    pub outcome: ComparisonOutcome,
}

/// Decides matches and holds the single pending comparison.
#[derive(Clone, Debug, Default)]
pub struct MatchResolver {
    pending: Option<PendingComparison>,
}

impl MatchResolver {
    /// Create a resolver in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a comparison is pending settlement.
    ///
    /// While true, activation requests must be rejected without side
    /// effects; they do not queue or pre-empt the pending resolution.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin comparing two exposed cards.
    ///
    /// Returns the decided outcome so the caller can pick the matching
    /// presentation delay. Must only be called from the idle state with
    /// both cards exposed.
    pub fn begin(&mut self, store: &CardStore, pair: CardPair) -> ComparisonOutcome {
        debug_assert!(self.pending.is_none(), "comparison already pending");
        debug_assert!(pair
            .iter()
            .all(|&i| store.card(i).map(|c| c.state()) == Some(CardState::Exposed)));

        let first = store.card(pair[0]).map(|c| c.symbol);
        let second = store.card(pair[1]).map(|c| c.symbol);
        let outcome = if first.is_some() && first == second {
            ComparisonOutcome::Matched
        } else {
            ComparisonOutcome::Mismatched
        };

        self.pending = Some(PendingComparison { pair, outcome });
        outcome
    }

    /// Settle the pending comparison against the store.
    ///
    /// Commits the outcome (lock-in or reset to hidden), clears the lock,
    /// and returns what was settled. Returns `None` if nothing was pending,
    /// so a stray settlement task is harmless.
    pub fn settle(&mut self, store: &mut CardStore) -> Option<PendingComparison> {
        let pending = self.pending.take()?;
        match pending.outcome {
            ComparisonOutcome::Matched => store.settle_as_matched(pending.pair),
            ComparisonOutcome::Mismatched => store.settle_as_mismatch(pending.pair),
        }
        Some(pending)
    }

    /// Drop the pending comparison without touching the store.
    ///
    /// Used on reset, where the whole store is discarded anyway.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardIndex, SymbolId};

    fn store_xyxy() -> CardStore {
        let deck = [0u16, 1, 0, 1]
            .iter()
            .enumerate()
            .map(|(i, &s)| Card::new(CardIndex::new(i as u16), SymbolId::new(s)))
            .collect();
        CardStore::new(deck)
    }

    fn expose_both(store: &mut CardStore, a: u16, b: u16) -> CardPair {
        store.expose(CardIndex::new(a)).unwrap();
        store.expose(CardIndex::new(b)).unwrap();
        store.exposed_pair().unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let resolver = MatchResolver::new();
        assert!(!resolver.is_locked());
    }

    #[test]
    fn test_match_detected_and_settled() {
        let mut store = store_xyxy();
        let mut resolver = MatchResolver::new();
        let pair = expose_both(&mut store, 0, 2);

        let outcome = resolver.begin(&store, pair);
        assert_eq!(outcome, ComparisonOutcome::Matched);
        assert!(resolver.is_locked());

        let settled = resolver.settle(&mut store).unwrap();
        assert_eq!(settled.outcome, ComparisonOutcome::Matched);
        assert!(!resolver.is_locked());
        assert!(store.card(CardIndex::new(0)).unwrap().is_matched());
        assert!(store.card(CardIndex::new(2)).unwrap().is_matched());
    }

    #[test]
    fn test_mismatch_detected_and_settled() {
        let mut store = store_xyxy();
        let mut resolver = MatchResolver::new();
        let pair = expose_both(&mut store, 0, 1);

        let outcome = resolver.begin(&store, pair);
        assert_eq!(outcome, ComparisonOutcome::Mismatched);

        resolver.settle(&mut store).unwrap();
        assert!(store.card(CardIndex::new(0)).unwrap().is_hidden());
        assert!(store.card(CardIndex::new(1)).unwrap().is_hidden());
        assert!(store.exposed().is_empty());
    }

    #[test]
    fn test_settle_without_pending_is_noop() {
        let mut store = store_xyxy();
        let mut resolver = MatchResolver::new();

        assert_eq!(resolver.settle(&mut store), None);
    }

    #[test]
    fn test_cancel_clears_lock_without_settling() {
        let mut store = store_xyxy();
        let mut resolver = MatchResolver::new();
        let pair = expose_both(&mut store, 0, 1);
        resolver.begin(&store, pair);

        resolver.cancel();

        assert!(!resolver.is_locked());
        // Store untouched: both cards still exposed.
        assert!(store.card(CardIndex::new(0)).unwrap().is_exposed());
        assert_eq!(resolver.settle(&mut store), None);
    }
}
