//! Scoring module - points, level and gravity speed
//!
//! - Each cleared row is worth `100 * level`, using the level in effect when
//!   the rows are cleared.
//! - Hard drop awards 2 points per row travelled.
//! - Level is `score / 1000 + 1`, so it only ever rises.
//! - Gravity interval is the base interval divided by the level.

use crate::types::{
    FAST_DROP_MS, HARD_DROP_POINTS_PER_ROW, LEVEL_SCORE_DIVISOR, LINE_CLEAR_POINTS,
    NORMAL_DROP_MS, START_LEVEL,
};

/// Points for clearing `lines` rows in one freeze at `level`
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    (lines as u32)
        .saturating_mul(LINE_CLEAR_POINTS)
        .saturating_mul(level)
}

/// Bonus for a hard drop that travelled `distance` rows
pub fn hard_drop_bonus(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level reached at a given score
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_DIVISOR + START_LEVEL
}

/// Gravity interval in milliseconds
pub fn drop_interval_ms(level: u32, soft_drop: bool) -> u64 {
    let base = if soft_drop { FAST_DROP_MS } else { NORMAL_DROP_MS };
    base / u64::from(level.max(1))
}
