//! Session-level events.
//!
//! The engine's only outbound surface. Events are queued as they happen and
//! drained by the host's renderer; the engine never calls out.

use serde::{Deserialize, Serialize};

use crate::cards::CardIndex;

use super::hints::HintDenyReason;
use super::store::CardPair;

/// Something the renderer should show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A card was turned face-up.
    CardExposed {
        /// The activated card.
        index: CardIndex,
    },
    /// A comparison settled as a match; both cards are locked in.
    PairMatched {
        /// The matched cards, in exposure order.
        pair: CardPair,
        /// Total pairs matched so far this session.
        matched_pairs: usize,
    },
    /// A comparison settled as a mismatch; both cards are hidden again.
    PairMismatched {
        /// The mismatched cards, in exposure order.
        pair: CardPair,
    },
    /// A hint was granted: emphasize both cards briefly. No card state
    /// changed.
    HintGranted {
        /// The still-findable pair.
        pair: CardPair,
    },
    /// A hint was denied.
    HintDenied {
        /// Why.
        reason: HintDenyReason,
    },
    /// The displayed elapsed time advanced to a new whole second.
    ClockTick {
        /// Elapsed whole seconds since the first activation.
        elapsed_secs: u64,
    },
    /// Terminal: every pair is matched.
    GameWon {
        /// Final elapsed time.
        elapsed_secs: u64,
        /// Total completed comparisons.
        move_count: u32,
    },
}
