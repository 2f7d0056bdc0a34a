//! Cards and deck construction.

pub mod card;
pub mod deck;

pub use card::{Card, CardIndex, CardState, SymbolId};
pub use deck::{build_deck, symbol_alphabet};
