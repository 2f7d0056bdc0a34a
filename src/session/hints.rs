//! Hint allocator.
//!
//! Bounded-use assistant: reveals one still-findable pair for a brief,
//! non-persistent visual emphasis. A granted hint never changes card state,
//! never touches the exposed queue, and never moves the move counter; it
//! only spends budget. The budget never replenishes within a session.

use serde::{Deserialize, Serialize};

use super::store::{CardPair, CardStore};

/// Why a hint request was denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintDenyReason {
    /// The hint budget is spent.
    Exhausted,
    /// A comparison's settlement is pending.
    Busy,
    /// No symbol currently has two hidden cards. Reachable only when the
    /// last unfound pair has one card exposed; the budget is not charged.
    NoHiddenPair,
}

/// Result of a hint request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintResult {
    /// The two cards to emphasize. Budget was charged.
    Granted(CardPair),
    /// Rejected as a result value; both are expected steady-state
    /// conditions, not errors.
    Denied(HintDenyReason),
}

impl HintResult {
    /// Check whether the hint was granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, HintResult::Granted(_))
    }
}

/// Grants a limited number of hints per session.
#[derive(Clone, Debug)]
pub struct HintAllocator {
    remaining: u32,
}

impl HintAllocator {
    /// Create an allocator with the given budget.
    #[must_use]
    pub fn new(budget: u32) -> Self {
        Self { remaining: budget }
    }

    /// Hints left in the budget.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Request a hint.
    ///
    /// Denied while the resolver is comparing or once the budget is spent.
    /// On success, returns a symbol's two hidden cards and decrements the
    /// budget by one.
    pub fn use_hint(&mut self, locked: bool, store: &CardStore) -> HintResult {
        if self.remaining == 0 {
            return HintResult::Denied(HintDenyReason::Exhausted);
        }
        if locked {
            return HintResult::Denied(HintDenyReason::Busy);
        }
        match store.hidden_pair() {
            Some(pair) => {
                self.remaining -= 1;
                HintResult::Granted(pair)
            }
            None => HintResult::Denied(HintDenyReason::NoHiddenPair),
        }
    }
}
