//! Scoring bounds and the star rating.
//!
//! Scores are kept in tenths of a point so the decaying multiplier never accumulates
//! floating-point error.

use tetrad_core::{
    BONUS_DECREASE_TENTHS, GroupColor, MAX_BONUS_TENTHS, MAX_STARS, MIN_BONUS_TENTHS,
};

/// Score, in tenths, of finding every group at the minimum multiplier.
fn lowest_score_tenths() -> u32 {
    GroupColor::ALL
        .iter()
        .map(|color| color.base_points() * MIN_BONUS_TENTHS)
        .sum()
}

/// Score, in tenths, of finding the groups in rank order without a mistake.
fn highest_score_tenths() -> u32 {
    (0u32..)
        .zip(GroupColor::ALL)
        .map(|(rank, color)| {
            color.base_points() * (MAX_BONUS_TENTHS - BONUS_DECREASE_TENTHS * rank)
        })
        .sum()
}

/// Maps a score to a 0-5 star rating.
///
/// A zero score gets no stars. Any other score is clamped into the
/// `[lowest, highest]` range, normalized to `[0, 1]`, and bucketed into stars 1-5 with
/// boundaries at 1/4, 2/4, 3/4 and 4/4.
pub(crate) fn star_score(score_tenths: u32) -> u8 {
    if score_tenths == 0 {
        return 0;
    }
    let lowest = lowest_score_tenths();
    let highest = highest_score_tenths();
    let clamped = score_tenths.clamp(lowest, highest);
    let normalized = f64::from(clamped - lowest) / f64::from(highest - lowest);
    let buckets = f64::from(MAX_STARS - 1);
    (1..MAX_STARS)
        .find(|&stars| normalized < f64::from(stars) / buckets)
        .unwrap_or(MAX_STARS)
}

/// Verdict text for a finished (or abandoned) puzzle.
pub(crate) fn star_score_text(win: bool, stars: u8) -> &'static str {
    match (win, stars) {
        (true, 1) | (false, 2) => "Alright",
        (true, 2) => "Good",
        (true, 3) => "Great",
        (true, 4) => "Amazing",
        (true, 5) => "Perfect!",
        (false, 0) => "Oh No",
        (false, 1) => "OK",
        (false, 3) => "So Close",
        (false, 4) => "Wow",
        (false, 5) => "How?",
        _ => "",
    }
}
