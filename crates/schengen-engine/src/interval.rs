//! Normalize visit lists into merged day intervals of continuous presence.
//!
//! Filters out non-member visits, materializes ongoing visits up to the
//! reference date, sorts by start, then sweeps once to merge overlapping or
//! touching ranges.
//!
//! # Merge boundary
//!
//! Two ranges merge when `next.start <= running.end + 1 day`:
//!
//! - `[Mar 1, Mar 5]` + `[Mar 5, Mar 9]` (same-day transit between members) merge.
//! - `[Mar 1, Mar 5]` + `[Mar 6, Mar 9]` (exit one day, enter the next) merge:
//!   there is no day of absence between them.
//! - `[Mar 1, Mar 5]` + `[Mar 7, Mar 9]` stay separate: Mar 6 is a day outside.

use chrono::{Days, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::area::SchengenArea;
use crate::error::Result;
use crate::visit::VisitRecord;

/// A closed range `[start, end]` of days spent inside the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DayInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end, "DayInterval start after end");
        Self { start, end }
    }

    /// Number of days covered, both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Days shared with the closed range `[from, to]`.
    pub fn overlap_days(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        let lo = self.start.max(from);
        let hi = self.end.min(to);
        ((hi - lo).num_days() + 1).max(0)
    }

    /// Whether `next` (starting no earlier than `self`) merges into `self`.
    fn absorbs(&self, next: &DayInterval) -> bool {
        match self.end.checked_add_days(Days::new(1)) {
            Some(day_after) => next.start <= day_after,
            None => true,
        }
    }
}

/// Convert visits into a sorted, non-overlapping, non-adjacent interval list.
///
/// Every visit is validated first, member or not, so a malformed record fails
/// the call even if it would have been filtered out.
///
/// Ongoing visits end at `reference`. An ongoing visit that starts after
/// `reference` has not begun yet and contributes nothing.
///
/// # Errors
/// Returns `EngineError::InvalidVisit` for the first visit with
/// `entry_date > exit_date`.
pub fn normalize(
    visits: &[VisitRecord],
    reference: NaiveDate,
    area: &SchengenArea,
) -> Result<Vec<DayInterval>> {
    for visit in visits {
        visit.validate()?;
    }

    let intervals: Vec<DayInterval> = visits
        .iter()
        .filter(|v| area.is_member(&v.country))
        .filter_map(|v| {
            let end = v.exit_date.unwrap_or(reference);
            (v.entry_date <= end).then(|| DayInterval::new(v.entry_date, end))
        })
        .collect();

    Ok(merge_sorted(intervals))
}

/// Insert one more interval into an already-normalized list.
pub fn merge_interval(intervals: &[DayInterval], extra: DayInterval) -> Vec<DayInterval> {
    let mut all = Vec::with_capacity(intervals.len() + 1);
    all.extend_from_slice(intervals);
    all.push(extra);
    merge_sorted(all)
}

/// Total days covered by a normalized list.
pub fn total_days(intervals: &[DayInterval]) -> i64 {
    intervals.iter().map(DayInterval::days).sum()
}

/// `date` moved by `days`, saturating at the ends of the calendar.
pub(crate) fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

fn merge_sorted(mut intervals: Vec<DayInterval>) -> Vec<DayInterval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_unstable();

    let mut merged: Vec<DayInterval> = Vec::with_capacity(intervals.len());
    for next in intervals {
        if let Some(last) = merged.last_mut() {
            if last.absorbs(&next) {
                last.end = last.end.max(next.end);
                continue;
            }
        }
        merged.push(next);
    }

    merged
}
