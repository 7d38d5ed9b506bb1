//! Score formulas.
//!
//! Every reward and penalty scales with how many cards are on the table:
//! finding a match among many cards is easier, so it pays less, and
//! mistakes with a crowded table cost more. All arithmetic is integer
//! division on the table size; scores are signed and may go negative.

use std::time::Duration;

/// Seconds of hesitation per point of time penalty.
pub const SECONDS_PER_TIME_POINT: f64 = 5.0;

/// Cap on the time penalty for a single match.
pub const MAX_TIME_PENALTY: i64 = 6;

/// Base award for a match before the table-size discount.
pub const BASE_MATCH_AWARD: i64 = 12;

fn table(in_play: usize) -> i64 {
    in_play as i64
}

/// Cost of deselecting a card.
#[must_use]
pub fn deselect_penalty(in_play: usize) -> i64 {
    table(in_play) / 12
}

/// Cost of asking for more cards while a match is already on the table.
#[must_use]
pub fn deal_penalty(in_play: usize) -> i64 {
    (table(in_play) + 1) / 12
}

/// Cost of a rejected triple. Also the cost of an auto-completion.
#[must_use]
pub fn mismatch_penalty(in_play: usize) -> i64 {
    1 + table(in_play) / 8
}

/// Cost of a hint.
#[must_use]
pub fn hint_penalty(in_play: usize) -> i64 {
    1 + table(in_play) / 6
}

/// Points for a user match, measured before the triple leaves the table.
#[must_use]
pub fn user_match_award(in_play: usize) -> i64 {
    BASE_MATCH_AWARD - table(in_play) / 12
}

/// Points for an opponent match, measured before the triple leaves the table.
#[must_use]
pub fn agent_match_award(in_play: usize) -> i64 {
    BASE_MATCH_AWARD - table(in_play) / 3
}

/// One point per five seconds since the previous match, rounded, capped at six.
#[must_use]
pub fn time_penalty(elapsed: Duration) -> i64 {
    let points = (elapsed.as_secs_f64() / SECONDS_PER_TIME_POINT).round() as i64;
    points.min(MAX_TIME_PENALTY)
}
