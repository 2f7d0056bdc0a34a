//! Session machinery: card store, match resolver, clock, hints, scheduler,
//! events, and the controller that glues them together.

pub mod clock;
pub mod controller;
pub mod events;
pub mod hints;
pub mod resolver;
pub mod scheduler;
pub mod store;

pub use clock::SessionClock;
pub use controller::{GameSession, GameSessionBuilder, SessionPhase};
pub use events::SessionEvent;
pub use hints::{HintAllocator, HintDenyReason, HintResult};
pub use resolver::{ComparisonOutcome, MatchResolver, PendingComparison};
pub use scheduler::{Generation, ScheduledTask, Scheduler};
pub use store::{CardPair, CardStore};
