//! Find every maximal date range whose trailing-window usage exceeds the limit.
//!
//! `used(d) - used(d - 1) = inside(d) - inside(d - window_days)`, so the daily
//! slope of `used` only changes at four kinds of breakpoint per interval:
//! `start`, `end + 1`, `start + window_days` and `end + 1 + window_days`.
//! Between two breakpoints `used` is linear with slope -1, 0 or +1, so the
//! non-compliant days of each sub-range form a prefix, a suffix, all or none of
//! it. The scan evaluates the window once per breakpoint instead of once per
//! calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::StayRule;
use crate::interval::{shift, DayInterval};
use crate::window::used_days;

/// A maximal contiguous run of non-compliant days.
///
/// A day is non-compliant when its trailing window holds more than the limit,
/// whether or not the traveler is inside the area that day. A period therefore
/// runs on after an overstay ends until enough old days leave the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Highest `used_days` reached on any day of the period.
    pub peak_used_days: u32,
}

impl ViolationPeriod {
    /// Whether this period shares at least one day with `[from, to]`.
    pub fn intersects(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start <= to && from <= self.end
    }
}

/// Scan `[from, to]` (inclusive) for non-compliant days.
///
/// `intervals` must be normalized. Returns periods sorted by start; empty when
/// `from > to`.
pub fn find_violations(
    intervals: &[DayInterval],
    from: NaiveDate,
    to: NaiveDate,
    rule: &StayRule,
) -> Vec<ViolationPeriod> {
    if from > to || intervals.is_empty() {
        return Vec::new();
    }

    let span = (to - from).num_days() + 1;
    let window = i64::from(rule.window_days);
    let limit = i64::from(rule.max_stay_days);
    let offset = |date: NaiveDate| (date - from).num_days();
    let day = |k: i64| shift(from, k);

    let mut breakpoints: Vec<i64> = Vec::with_capacity(intervals.len() * 4 + 2);
    breakpoints.push(0);
    breakpoints.push(span);
    for iv in intervals {
        let s = offset(iv.start);
        let e1 = offset(iv.end) + 1;
        breakpoints.extend([s, e1, s + window, e1 + window]);
    }
    breakpoints.retain(|&k| (0..=span).contains(&k));
    breakpoints.sort_unstable();
    breakpoints.dedup();

    let mut periods: Vec<ViolationPeriod> = Vec::new();
    let mut push = |lo: i64, hi: i64, peak: i64| {
        let peak = u32::try_from(peak).unwrap_or(u32::MAX);
        if let Some(last) = periods.last_mut() {
            if offset(last.end) + 1 == lo {
                last.end = day(hi);
                last.peak_used_days = last.peak_used_days.max(peak);
                return;
            }
        }
        periods.push(ViolationPeriod {
            start: day(lo),
            end: day(hi),
            peak_used_days: peak,
        });
    };

    for pair in breakpoints.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = b - a;
        let first = day(a);
        let u0 = i64::from(used_days(intervals, first, rule));
        let slope = i64::from(is_inside(intervals, first))
            - i64::from(is_inside(intervals, shift(first, -window)));
        let last_used = u0 + slope * (len - 1);

        match slope {
            0 if u0 > limit => push(a, b - 1, u0),
            1 if last_used > limit => {
                let skip = (limit + 1 - u0).max(0);
                push(a + skip, b - 1, last_used);
            }
            -1 if u0 > limit => {
                let keep = (u0 - limit).min(len);
                push(a, a + keep - 1, u0);
            }
            _ => {}
        }
    }

    periods
}

/// Whether `date` falls inside any normalized interval.
pub(crate) fn is_inside(intervals: &[DayInterval], date: NaiveDate) -> bool {
    let idx = intervals.partition_point(|iv| iv.end < date);
    intervals.get(idx).is_some_and(|iv| iv.contains(date))
}
