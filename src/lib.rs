//! # pairs-engine
//!
//! A memory-matching ("pairs") mini-game engine: a shuffled deck of symbol
//! cards, per-card visibility state, single-pending-comparison match
//! resolution with delayed settlement, a drift-free session clock, and a
//! bounded hint allocator.
//!
//! ## Design Principles
//!
//! 1. **Pure library**: no I/O, rendering, or persistence. The engine
//!    consumes activations and emits `SessionEvent`s for an external
//!    renderer to consume.
//!
//! 2. **Single logical thread**: delayed settlement and the clock refresh
//!    are explicit scheduled tasks pumped by the host, not spawned timers.
//!    Scheduled tasks carry a session generation so a reset can never be
//!    reached by a stale callback.
//!
//! 3. **Derived time**: elapsed seconds are always recomputed from the
//!    wall-clock anchor, never accumulated from ticks, so a throttled or
//!    skipped refresh cannot skew the value.
//!
//! ## Modules
//!
//! - `core`: configuration, error taxonomy, RNG, time sources
//! - `cards`: card/symbol model and the deck builder
//! - `session`: card store, match resolver, clock, hints, scheduler,
//!   events, and the session controller
//!
//! ## Example
//!
//! ```
//! use pairs_engine::{CardIndex, GameConfig, GameSession};
//!
//! let mut session = GameSession::builder()
//!     .with_config(GameConfig::new().with_pair_count(4))
//!     .build()
//!     .unwrap();
//! session.start();
//!
//! session.activate(CardIndex::new(0));
//! session.activate(CardIndex::new(1));
//!
//! // Host loop: pump scheduled work, then render the emitted events.
//! session.tick();
//! for event in session.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod cards;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ActivationOutcome, DeckRng, EngineError, GameConfig, ManualClock, RejectReason, TimeSource,
    WallClock, DEFAULT_HINT_BUDGET, DEFAULT_PAIR_COUNT,
};

pub use crate::cards::{build_deck, symbol_alphabet, Card, CardIndex, CardState, SymbolId};

pub use crate::session::{
    CardPair, CardStore, ComparisonOutcome, GameSession, GameSessionBuilder, Generation,
    HintAllocator, HintDenyReason, HintResult, MatchResolver, PendingComparison, ScheduledTask,
    Scheduler, SessionClock, SessionEvent, SessionPhase,
};
