//! Timing module - the tick-interval speed curve
//!
//! The interval shrinks as the score grows: 3ms per point up to the
//! breakpoint score, 2ms per point beyond it, floored at the minimum
//! interval. The curve is continuous at the breakpoint and never increases
//! with score.

use crate::types::{
    BASE_TICK_MS, MIN_TICK_MS, SPEEDUP_BREAK_SCORE, SPEEDUP_EARLY_MS, SPEEDUP_LATE_MS,
};

/// Tick interval in milliseconds for a given score
pub fn tick_interval_ms(score: u32) -> u32 {
    let early_points = score.min(SPEEDUP_BREAK_SCORE);
    let late_points = score.saturating_sub(SPEEDUP_BREAK_SCORE);
    let speedup = early_points
        .saturating_mul(SPEEDUP_EARLY_MS)
        .saturating_add(late_points.saturating_mul(SPEEDUP_LATE_MS));
    BASE_TICK_MS.saturating_sub(speedup).max(MIN_TICK_MS)
}
