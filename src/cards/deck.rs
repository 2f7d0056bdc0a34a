//! Deck builder.
//!
//! Duplicates a symbol alphabet into pairs and applies a uniform random
//! permutation (Fisher–Yates). Every arrangement of the `2N` positions is
//! equally reachable modulo symbol duplication. Each call consumes fresh
//! randomness from the supplied RNG, so decks built for separate sessions
//! are uncorrelated.

use rustc_hash::FxHashSet;

use crate::core::{DeckRng, EngineError};

use super::card::{Card, CardIndex, SymbolId};

/// Generate the canonical alphabet of `n` distinct symbols.
#[must_use]
pub fn symbol_alphabet(n: usize) -> Vec<SymbolId> {
    (0..n).map(|i| SymbolId::new(i as u16)).collect()
}

/// Build a shuffled deck of `2N` cards from `N` distinct symbols.
///
/// Fails with `InvalidConfiguration` if the alphabet is empty or contains
/// duplicates.
pub fn build_deck(symbols: &[SymbolId], rng: &mut DeckRng) -> Result<Vec<Card>, EngineError> {
    if symbols.is_empty() {
        return Err(EngineError::InvalidConfiguration(
            "deck requires at least one symbol".into(),
        ));
    }

    let mut seen = FxHashSet::default();
    for symbol in symbols {
        if !seen.insert(symbol) {
            return Err(EngineError::InvalidConfiguration(format!(
                "duplicate symbol {} in alphabet",
                symbol
            )));
        }
    }

    let mut slots: Vec<SymbolId> = Vec::with_capacity(symbols.len() * 2);
    slots.extend_from_slice(symbols);
    slots.extend_from_slice(symbols);

    // Fisher–Yates: swap each position with a uniform pick from [0, i].
    for i in (1..slots.len()).rev() {
        let j = rng.gen_index(i + 1);
        slots.swap(i, j);
    }

    Ok(slots
        .into_iter()
        .enumerate()
        .map(|(i, symbol)| Card::new(CardIndex::new(i as u16), symbol))
        .collect())
}
