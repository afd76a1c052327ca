//! Telegram upload tiers.
//!
//! Regular accounts can receive files up to 50MB through the bot, premium
//! accounts up to 2048MB. Both thresholds come from configuration.

use crate::core::config::limits;

/// Which tier a file size falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// Fits the regular limit
    Regular,
    /// Above the regular limit, fits the premium limit
    Premium,
    /// Above the premium limit
    Oversize,
}

/// What to do with a downloaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierDecision {
    /// Send it right away
    Deliver,
    /// Ask the user whether they have Telegram Premium
    AskPremium,
    /// Too large for any tier
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    pub regular_mb: u64,
    pub premium_mb: u64,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self::new(limits::REGULAR_USER_LIMIT_MB, limits::PREMIUM_USER_LIMIT_MB)
    }
}

impl TierLimits {
    pub fn new(regular_mb: u64, premium_mb: u64) -> Self {
        if regular_mb > premium_mb {
            log::warn!(
                "Regular limit {}MB is above premium limit {}MB; premium prompts will never be shown",
                regular_mb,
                premium_mb
            );
        }
        Self { regular_mb, premium_mb }
    }

    /// Classifies a measured size. Boundaries are inclusive on the lower tier.
    pub fn classify(&self, size_mb: f64) -> SizeTier {
        if size_mb > self.premium_mb as f64 {
            SizeTier::Oversize
        } else if size_mb > self.regular_mb as f64 {
            SizeTier::Premium
        } else {
            SizeTier::Regular
        }
    }

    /// Routes a measured size given what is known about the user's account.
    ///
    /// # Example
    ///
    /// ```
    /// use grabcore::{TierDecision, TierLimits};
    ///
    /// let tiers = TierLimits::default();
    /// assert_eq!(tiers.route(30.0, false), TierDecision::Deliver);
    /// assert_eq!(tiers.route(120.0, false), TierDecision::AskPremium);
    /// assert_eq!(tiers.route(120.0, true), TierDecision::Deliver);
    /// assert_eq!(tiers.route(3000.0, true), TierDecision::Reject);
    /// ```
    pub fn route(&self, size_mb: f64, has_premium: bool) -> TierDecision {
        match self.classify(size_mb) {
            SizeTier::Regular => TierDecision::Deliver,
            SizeTier::Premium if has_premium => TierDecision::Deliver,
            SizeTier::Premium => TierDecision::AskPremium,
            SizeTier::Oversize => TierDecision::Reject,
        }
    }
}
