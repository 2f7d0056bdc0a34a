//! Game session controller.
//!
//! Owns one deck, card store, match resolver, session clock, and hint
//! allocator, and exposes the public call-in surface: `start`, `activate`,
//! `use_hint`, `reset`, and the cooperative `tick` pump.
//!
//! ## Scheduling
//!
//! All logic runs on one logical thread. Delayed settlement and the clock
//! refresh are scheduled tasks that every public operation pumps before
//! doing its own work, so a settlement that has come due is applied before
//! the next activation is considered. This preserves the ordering
//! guarantee: comparison *k+1* never begins before comparison *k* has
//! settled.
//!
//! ## Reset
//!
//! `reset()` discards and recreates the session state rather than mutating
//! it back piecemeal. The generation counter is bumped and all scheduled
//! tasks are cancelled first, so a stale settlement can never fire against
//! the rebuilt deck.

use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cards::{build_deck, symbol_alphabet, Card, CardIndex, SymbolId};
use crate::core::{
    ActivationOutcome, DeckRng, EngineError, GameConfig, RejectReason, TimeSource, WallClock,
};

use super::clock::SessionClock;
use super::events::SessionEvent;
use super::hints::{HintAllocator, HintDenyReason, HintResult};
use super::resolver::{ComparisonOutcome, MatchResolver};
use super::scheduler::{Generation, ScheduledTask, Scheduler};
use super::store::CardStore;

/// Lifecycle phase of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created but not started; activations are rejected.
    #[default]
    NotStarted,
    /// Accepting activations.
    Playing,
    /// Terminal; every pair is matched. Only `reset()` leaves this phase.
    Won,
}

/// Builder for a `GameSession`.
///
/// Defaults to the standard configuration, a deck shuffled from OS entropy,
/// and the wall clock. Tests pin the seed or the exact layout and swap in a
/// manual time source.
pub struct GameSessionBuilder {
    config: GameConfig,
    seed: Option<u64>,
    layout: Option<Vec<SymbolId>>,
    time: Box<dyn TimeSource>,
}

impl Default for GameSessionBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            seed: None,
            layout: None,
            time: Box::new(WallClock),
        }
    }
}

impl GameSessionBuilder {
    /// Create a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given configuration.
    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the shuffle for a reproducible deck.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fix the deck to an exact card order, bypassing the shuffle.
    ///
    /// The layout must contain every symbol exactly twice; `pair_count` is
    /// derived from it.
    #[must_use]
    pub fn with_layout(mut self, layout: Vec<SymbolId>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Use a custom time source.
    #[must_use]
    pub fn with_time_source(mut self, time: Box<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    /// Build the session in the `NotStarted` phase.
    pub fn build(mut self) -> Result<GameSession, EngineError> {
        if let Some(layout) = &self.layout {
            validate_layout(layout)?;
            self.config.pair_count = layout.len() / 2;
        }
        self.config.validate()?;

        let mut rng = match self.seed {
            Some(seed) => DeckRng::new(seed),
            None => DeckRng::from_entropy(),
        };
        let alphabet = symbol_alphabet(self.config.pair_count);
        let deck = match &self.layout {
            Some(layout) => layout_deck(layout),
            None => build_deck(&alphabet, &mut rng)?,
        };

        Ok(GameSession {
            hints: HintAllocator::new(self.config.hint_budget),
            store: CardStore::new(deck),
            resolver: MatchResolver::new(),
            clock: SessionClock::new(),
            scheduler: Scheduler::new(),
            events: VecDeque::new(),
            phase: SessionPhase::NotStarted,
            generation: 0,
            move_count: 0,
            matched_pairs: 0,
            config: self.config,
            alphabet,
            layout: self.layout,
            rng,
            time: self.time,
        })
    }
}

fn validate_layout(layout: &[SymbolId]) -> Result<(), EngineError> {
    if layout.is_empty() || layout.len() % 2 != 0 {
        return Err(EngineError::InvalidConfiguration(
            "layout must hold a positive, even number of cards".into(),
        ));
    }
    let mut counts: FxHashMap<SymbolId, usize> = FxHashMap::default();
    for &symbol in layout {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    if counts.values().any(|&c| c != 2) {
        return Err(EngineError::InvalidConfiguration(
            "layout must contain every symbol exactly twice".into(),
        ));
    }
    Ok(())
}

fn layout_deck(layout: &[SymbolId]) -> Vec<Card> {
    layout
        .iter()
        .enumerate()
        .map(|(i, &symbol)| Card::new(CardIndex::new(i as u16), symbol))
        .collect()
}

/// One memory-matching game session.
///
/// Created via `GameSession::builder()`. The host drives it by forwarding
/// user activations, calling `tick()` at its refresh cadence (at most
/// `clock_refresh` apart), and draining emitted events for rendering.
pub struct GameSession {
    config: GameConfig,
    store: CardStore,
    resolver: MatchResolver,
    clock: SessionClock,
    hints: HintAllocator,
    scheduler: Scheduler,
    events: VecDeque<SessionEvent>,
    phase: SessionPhase,
    generation: Generation,
    move_count: u32,
    matched_pairs: usize,
    alphabet: Vec<SymbolId>,
    layout: Option<Vec<SymbolId>>,
    rng: DeckRng,
    time: Box<dyn TimeSource>,
}

impl GameSession {
    /// Start building a session.
    #[must_use]
    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }

    /// Create a session with the default configuration and a fresh deck.
    pub fn with_defaults() -> Result<Self, EngineError> {
        Self::builder().build()
    }

    // === Public operations ===

    /// Begin playing. No-op unless the session is `NotStarted`.
    pub fn start(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            return;
        }
        self.phase = SessionPhase::Playing;
        debug!(pairs = self.config.pair_count, "session started");
    }

    /// Activate the card at `index`.
    ///
    /// The sole entry point that drives the match resolver. Safe to call
    /// redundantly: re-activating an exposed or matched card, or activating
    /// while a settlement is pending, is rejected without side effects.
    pub fn activate(&mut self, index: CardIndex) -> ActivationOutcome {
        let now = self.time.now();
        self.pump(now);

        match self.phase {
            SessionPhase::NotStarted => {
                return ActivationOutcome::Rejected(RejectReason::NotStarted)
            }
            SessionPhase::Won => return ActivationOutcome::Rejected(RejectReason::Finished),
            SessionPhase::Playing => {}
        }
        if self.resolver.is_locked() {
            return ActivationOutcome::Rejected(RejectReason::Locked);
        }
        if let Err(reason) = self.store.expose(index) {
            return ActivationOutcome::Rejected(reason);
        }

        // The clock anchors on the first accepted activation.
        self.clock.start(now);
        self.events.push_back(SessionEvent::CardExposed { index });
        trace!(%index, "card exposed");

        if let Some(pair) = self.store.exposed_pair() {
            // Second card of a comparison: count the move now, settle later.
            self.move_count += 1;
            let outcome = self.resolver.begin(&self.store, pair);
            let delay = match outcome {
                ComparisonOutcome::Matched => self.config.match_delay,
                ComparisonOutcome::Mismatched => self.config.mismatch_delay,
            };
            self.scheduler
                .schedule(now + delay, self.generation, ScheduledTask::SettleComparison);
            debug!(move_count = self.move_count, ?outcome, "comparison began");
        }

        ActivationOutcome::Accepted
    }

    /// Request a hint.
    ///
    /// Granted hints emit `HintGranted` with the pair to emphasize; the
    /// emphasis is the renderer's job and no card state changes.
    pub fn use_hint(&mut self) -> HintResult {
        let now = self.time.now();
        self.pump(now);

        let result = if self.phase != SessionPhase::Playing {
            HintResult::Denied(HintDenyReason::Busy)
        } else {
            self.hints.use_hint(self.resolver.is_locked(), &self.store)
        };

        match result {
            HintResult::Granted(pair) => {
                debug!(remaining = self.hints.remaining(), "hint granted");
                self.events.push_back(SessionEvent::HintGranted { pair });
            }
            HintResult::Denied(reason) => {
                self.events.push_back(SessionEvent::HintDenied { reason });
            }
        }
        result
    }

    /// Discard the session state and rebuild a fresh `Playing` session.
    ///
    /// Cancels every scheduled task and bumps the generation first, so a
    /// pending settlement from the old session can never touch the new one.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.generation += 1;

        let deck = match &self.layout {
            Some(layout) => layout_deck(layout),
            None => build_deck(&self.alphabet, &mut self.rng)
                .expect("alphabet validated at session build"),
        };
        self.store = CardStore::new(deck);
        self.resolver = MatchResolver::new();
        self.clock = SessionClock::new();
        self.hints = HintAllocator::new(self.config.hint_budget);
        self.events.clear();
        self.move_count = 0;
        self.matched_pairs = 0;
        self.phase = SessionPhase::Playing;

        debug!(generation = self.generation, "session reset");
    }

    /// Cooperative pump: run due scheduled tasks and refresh the clock.
    ///
    /// The host calls this at its render cadence, at most `clock_refresh`
    /// apart. The cadence only affects how promptly consequences appear;
    /// elapsed time is derived from the clock anchor and cannot drift.
    pub fn tick(&mut self) {
        let now = self.time.now();
        self.pump(now);
    }

    // === Queries ===

    /// Drain the queued events for rendering.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Completed comparisons so far. Never decreases.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Pairs matched so far, in `[0, pair_count]`.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Hints left in the budget. Never increases.
    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.hints.remaining()
    }

    /// True while a comparison's settlement is pending.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.resolver.is_locked()
    }

    /// Elapsed whole seconds since the first accepted activation.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs(self.time.now())
    }

    /// Number of symbol pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.config.pair_count
    }

    /// Get a card by index.
    #[must_use]
    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.store.card(index)
    }

    /// Iterate over all cards in deck order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.store.cards()
    }

    /// The indices currently exposed, in exposure order.
    #[must_use]
    pub fn exposed(&self) -> &[CardIndex] {
        self.store.exposed()
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Scheduled work ===

    fn pump(&mut self, now: Instant) {
        for task in self.scheduler.pop_due(now, self.generation) {
            match task {
                ScheduledTask::SettleComparison => self.settle_comparison(now),
                ScheduledTask::AnnounceWin => self.announce_win(now),
            }
        }
        if self.phase == SessionPhase::Playing {
            if let Some(elapsed) = self.clock.poll(now) {
                self.events
                    .push_back(SessionEvent::ClockTick { elapsed_secs: elapsed });
            }
        }
    }

    fn settle_comparison(&mut self, now: Instant) {
        let Some(settled) = self.resolver.settle(&mut self.store) else {
            return;
        };
        match settled.outcome {
            ComparisonOutcome::Matched => {
                self.matched_pairs += 1;
                debug!(matched = self.matched_pairs, "pair matched");
                self.events.push_back(SessionEvent::PairMatched {
                    pair: settled.pair,
                    matched_pairs: self.matched_pairs,
                });
                if self.matched_pairs == self.config.pair_count {
                    self.scheduler.schedule(
                        now + self.config.win_announce_delay,
                        self.generation,
                        ScheduledTask::AnnounceWin,
                    );
                }
            }
            ComparisonOutcome::Mismatched => {
                self.events.push_back(SessionEvent::PairMismatched {
                    pair: settled.pair,
                });
            }
        }
    }

    fn announce_win(&mut self, now: Instant) {
        self.phase = SessionPhase::Won;
        self.clock.stop(now);
        let elapsed_secs = self.clock.elapsed_secs(now);
        debug!(elapsed_secs, moves = self.move_count, "game won");
        self.events.push_back(SessionEvent::GameWon {
            elapsed_secs,
            move_count: self.move_count,
        });
    }
}
