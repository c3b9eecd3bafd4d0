//! Reduction of a [`BiasReport`] to a single 0–100 severity.

use crate::report::BiasReport;

/// Highest possible score.
pub const MAX_SCORE: u32 = 100;

/// Weighted match count, capped at [`MAX_SCORE`].
///
/// Each match adds its category's [`weight`](crate::BiasCategory::weight).
pub fn score(report: &BiasReport) -> u32 {
    report
        .iter()
        .map(|(category, matches)| {
            let count = u32::try_from(matches.len()).unwrap_or(u32::MAX);
            count.saturating_mul(category.weight())
        })
        .fold(0u32, u32::saturating_add)
        .min(MAX_SCORE)
}
