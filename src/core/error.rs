//! Error taxonomy for the engine.
//!
//! Two tiers:
//!
//! - `EngineError`: fatal at session creation (bad configuration). Surfaced
//!   to the caller as a `Result`.
//! - `RejectReason` / `ActivationOutcome`: expected steady-state rejections
//!   of an activation request. Absorbed without any state change; returned
//!   as plain values so a host can surface a no-op signal if it wants to.
//!
//! No error is retried automatically. Every accepted mutation is a single
//! atomic state transition with no intermediate observable state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors at session or deck creation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The configuration cannot produce a playable session.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Why an activation request was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The session has not been started yet.
    NotStarted,
    /// The session is already won; call `reset()` first.
    Finished,
    /// A comparison's settlement is pending; input is blocked.
    Locked,
    /// The card is already face-up awaiting comparison.
    AlreadyExposed,
    /// The card is already matched and locked in.
    AlreadyMatched,
    /// The index is outside the deck.
    OutOfBounds,
}

/// Result of an `activate` call.
///
/// Rejections carry no side effects: no card changed state, no counter
/// moved, no event was queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The card was exposed.
    Accepted,
    /// The request was absorbed without side effects.
    Rejected(RejectReason),
}

impl ActivationOutcome {
    /// Check whether the activation was accepted.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, ActivationOutcome::Accepted)
    }
}
