//! Score Conversion
//!
//! Maps an authoritative score to progression and currency units for the
//! rewards ledger. Pure and total: any input, including NaN, maps to a
//! non-negative amount.

use serde::{Serialize, Deserialize};

/// Score points per currency point.
pub const SCORE_PER_CURRENCY_POINT: f64 = 50.0;

/// Experience earned for a score (currently 1:1).
pub fn experience(score: f64) -> u64 {
    clamp_floor(score)
}

/// Currency earned for a score, one point per 50 score.
pub fn currency_points(score: f64) -> u64 {
    clamp_floor(score / SCORE_PER_CURRENCY_POINT)
}

/// `max(0, floor(value))`, with non-finite input treated as zero.
fn clamp_floor(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // `as` saturates at u64::MAX for huge finite values
    value.floor() as u64
}

/// Ledger deltas for one finished session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDelta {
    /// Experience to add.
    pub experience: u64,
    /// Currency to add.
    pub currency: u64,
}

impl RewardDelta {
    /// Rewards for an authoritative score.
    pub fn from_score(score: u64) -> Self {
        let score = score as f64;
        Self {
            experience: experience(score),
            currency: currency_points(score),
        }
    }
}
