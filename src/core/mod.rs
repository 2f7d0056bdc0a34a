//! Core types: configuration, errors, randomness, and time sources.

pub mod config;
pub mod error;
pub mod rng;
pub mod time;

pub use config::{GameConfig, DEFAULT_HINT_BUDGET, DEFAULT_PAIR_COUNT};
pub use error::{ActivationOutcome, EngineError, RejectReason};
pub use rng::DeckRng;
pub use time::{ManualClock, TimeSource, WallClock};
