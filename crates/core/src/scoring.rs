//! Scoring module - match rewards and miss penalties
//!
//! One canonical formula:
//! - A match awards `MATCH_REWARD + (combo - 1) * STREAK_BONUS`, where `combo`
//!   already includes the match being scored (first match of a streak = 1).
//! - A miss deducts `MISS_PENALTY`, flooring the score at zero.

use crate::types::{MATCH_REWARD, MISS_PENALTY, STREAK_BONUS};

/// Points for a match at streak length `combo` (1-based).
pub fn match_points(combo: u32) -> u32 {
    let streak_steps = combo.saturating_sub(1);
    MATCH_REWARD.saturating_add(streak_steps.saturating_mul(STREAK_BONUS))
}

/// Score after a miss penalty, and the number of points actually deducted.
pub fn apply_miss_penalty(score: u32) -> (u32, u32) {
    let deducted = score.min(MISS_PENALTY);
    (score - deducted, deducted)
}
