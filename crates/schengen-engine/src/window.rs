//! Trailing-window evaluation: how many days of the window ending at a
//! reference date were spent inside the area.
//!
//! The window for reference date `r` is `[r - (window_days - 1), r]`, both ends
//! inclusive. Because intervals are pre-merged, the used-day count is a plain
//! sum of clipped overlaps, O(number of intervals).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::StayRule;
use crate::interval::{shift, DayInterval};

/// Compliance figures for a single reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    pub reference_date: NaiveDate,
    /// First day of the trailing window.
    pub window_start: NaiveDate,
    pub used_days: u32,
    /// `max(0, max_stay_days - used_days)`.
    pub remaining_days: u32,
    pub is_compliant: bool,
    /// First later date on which `used_days` drops absent further travel:
    /// the oldest counted day plus `window_days`. `None` when nothing is counted.
    pub next_reset_date: Option<NaiveDate>,
}

/// First day of the trailing window ending at `reference`.
pub fn window_start(reference: NaiveDate, rule: &StayRule) -> NaiveDate {
    shift(reference, -rule.lookback())
}

/// Days inside the area during the trailing window ending at `reference`.
pub fn used_days(intervals: &[DayInterval], reference: NaiveDate, rule: &StayRule) -> u32 {
    let from = window_start(reference, rule);
    let total: i64 = intervals
        .iter()
        .take_while(|iv| iv.start <= reference)
        .map(|iv| iv.overlap_days(from, reference))
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Evaluate compliance at `reference` over a normalized interval list.
pub fn evaluate(
    intervals: &[DayInterval],
    reference: NaiveDate,
    rule: &StayRule,
) -> ComplianceStatus {
    let from = window_start(reference, rule);
    let used = used_days(intervals, reference, rule);

    let next_reset_date = intervals
        .iter()
        .find(|iv| iv.end >= from && iv.start <= reference)
        .map(|iv| shift(iv.start.max(from), i64::from(rule.window_days)));

    ComplianceStatus {
        reference_date: reference,
        window_start: from,
        used_days: used,
        remaining_days: rule.max_stay_days.saturating_sub(used),
        is_compliant: used <= rule.max_stay_days,
        next_reset_date,
    }
}
