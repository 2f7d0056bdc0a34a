//! Session configuration.
//!
//! A `GameConfig` fixes the shape of one session: how many symbol pairs the
//! deck holds, the hint budget, and the presentation delays. Hosts build one
//! with the defaults and override what they need.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Default number of symbol pairs in a deck.
pub const DEFAULT_PAIR_COUNT: usize = 8;

/// Default hint budget per session.
pub const DEFAULT_HINT_BUDGET: u32 = 3;

/// Configuration for one game session.
///
/// The mismatch delay defaults to longer than the match delay: the player
/// needs time to read both cards before they flip back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of distinct symbols; the deck holds `2 * pair_count` cards.
    pub pair_count: usize,

    /// How many hints a session may grant.
    pub hint_budget: u32,

    /// Delay between a matching comparison and its lock-in.
    pub match_delay: Duration,

    /// Delay between a mismatching comparison and the cards flipping back.
    pub mismatch_delay: Duration,

    /// Delay between the final match settling and the win announcement.
    pub win_announce_delay: Duration,

    /// Upper bound on the host's clock-refresh period. The clock derives
    /// elapsed time from its anchor, so a late refresh only delays display,
    /// never skews the value.
    pub clock_refresh: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            hint_budget: DEFAULT_HINT_BUDGET,
            match_delay: Duration::from_millis(300),
            mismatch_delay: Duration::from_millis(900),
            win_announce_delay: Duration::from_millis(500),
            clock_refresh: Duration::from_secs(1),
        }
    }
}

impl GameConfig {
    /// Create a configuration with the default delays and budgets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of symbol pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Set the hint budget.
    #[must_use]
    pub fn with_hint_budget(mut self, budget: u32) -> Self {
        self.hint_budget = budget;
        self
    }

    /// Set the match settlement delay.
    #[must_use]
    pub fn with_match_delay(mut self, delay: Duration) -> Self {
        self.match_delay = delay;
        self
    }

    /// Set the mismatch settlement delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Set the win announcement delay.
    #[must_use]
    pub fn with_win_announce_delay(mut self, delay: Duration) -> Self {
        self.win_announce_delay = delay;
        self
    }

    /// Set the clock refresh bound.
    #[must_use]
    pub fn with_clock_refresh(mut self, period: Duration) -> Self {
        self.clock_refresh = period;
        self
    }

    /// Validate the configuration.
    ///
    /// Rejects a pair count of zero, a deck too large for `CardIndex`, and
    /// a clock refresh period that is zero or longer than one second.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.pair_count < 1 {
            return Err(EngineError::InvalidConfiguration(
                "pair count must be at least 1".into(),
            ));
        }
        // Card indices are u16; the deck holds 2 * pair_count cards.
        if self.pair_count > (u16::MAX as usize + 1) / 2 {
            return Err(EngineError::InvalidConfiguration(format!(
                "pair count {} exceeds the addressable deck size",
                self.pair_count
            )));
        }
        if self.clock_refresh.is_zero() || self.clock_refresh > Duration::from_secs(1) {
            return Err(EngineError::InvalidConfiguration(
                "clock refresh period must be within (0, 1s]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.pair_count, 8);
        assert_eq!(config.hint_budget, 3);
        assert_eq!(config.match_delay, Duration::from_millis(300));
        assert_eq!(config.mismatch_delay, Duration::from_millis(900));
        assert!(config.mismatch_delay > config.match_delay);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_pair_count(2)
            .with_hint_budget(1)
            .with_match_delay(Duration::from_millis(100))
            .with_mismatch_delay(Duration::from_millis(200))
            .with_win_announce_delay(Duration::from_millis(50))
            .with_clock_refresh(Duration::from_millis(250));

        assert_eq!(config.pair_count, 2);
        assert_eq!(config.hint_budget, 1);
        assert_eq!(config.match_delay, Duration::from_millis(100));
        assert_eq!(config.mismatch_delay, Duration::from_millis(200));
        assert_eq!(config.win_announce_delay, Duration::from_millis(50));
        assert_eq!(config.clock_refresh, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_pairs_rejected() {
        let config = GameConfig::new().with_pair_count(0);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_oversized_deck_rejected() {
        let config = GameConfig::new().with_pair_count(40_000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clock_refresh_bounds() {
        let too_slow = GameConfig::new().with_clock_refresh(Duration::from_secs(2));
        assert!(too_slow.validate().is_err());

        let zero = GameConfig::new().with_clock_refresh(Duration::ZERO);
        assert!(zero.validate().is_err());

        let exact = GameConfig::new().with_clock_refresh(Duration::from_secs(1));
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new().with_pair_count(4);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
