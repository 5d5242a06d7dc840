//! Validate a hypothetical trip against the traveler's history before booking.
//!
//! The trip is merged into the normalized history as one more interval and the
//! violation scanner runs over the trip's own dates. The same feasibility check
//! drives [`max_stay_days`](TripValidationResult::max_stay_days) and the
//! safe-window search.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, StayRule};
use crate::error::{EngineError, Result};
use crate::interval::{merge_interval, normalize, shift, DayInterval};
use crate::violation::{find_violations, ViolationPeriod};
use crate::visit::VisitRecord;
use crate::window::evaluate;

/// Outcome of validating a proposed trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripValidationResult {
    /// `true` iff no non-compliant day falls inside the trip.
    pub can_travel: bool,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    /// Longest compliant stay starting on the proposed entry date.
    /// `None` means unbounded (destination outside the area).
    pub max_stay_days: Option<u32>,
    pub remaining_days_after_trip: u32,
    /// Violations intersecting the trip.
    pub violations: Vec<ViolationPeriod>,
}

/// Validate the trip `[entry, exit]` to `country` against `visits`.
///
/// `today` resolves ongoing visits and decides whether the entry date is in the
/// past. A past entry date is a warning, not an error.
///
/// # Errors
/// Returns `EngineError::InvalidTrip` when `entry > exit`, and
/// `EngineError::InvalidVisit` when any history record is malformed.
pub fn validate_future_trip(
    visits: &[VisitRecord],
    entry: NaiveDate,
    exit: NaiveDate,
    country: &str,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<TripValidationResult> {
    if entry > exit {
        return Err(EngineError::InvalidTrip { entry, exit });
    }

    let rule = &config.rule;
    let history = normalize(visits, today, &config.area)?;

    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    if entry < today {
        warnings.push(format!(
            "Entry date {} is in the past (today is {})",
            entry, today
        ));
    }

    if !config.area.is_member(country) {
        return Ok(TripValidationResult {
            can_travel: true,
            warnings,
            suggestions,
            max_stay_days: None,
            remaining_days_after_trip: evaluate(&history, exit, rule).remaining_days,
            violations: Vec::new(),
        });
    }

    let merged = merge_interval(&history, DayInterval::new(entry, exit));
    let violations = find_violations(&merged, entry, exit, rule);
    let max_stay = max_stay_days(&history, entry, rule);
    let remaining = evaluate(&merged, exit, rule).remaining_days;

    let trip_days = (exit - entry).num_days() + 1;
    if trip_days > i64::from(rule.max_stay_days) {
        warnings.push(format!(
            "A {}-day trip exceeds the {}-day limit on its own",
            trip_days, rule.max_stay_days
        ));
    }

    if let Some(first) = violations.first() {
        let peak = violations
            .iter()
            .map(|v| v.peak_used_days)
            .max()
            .unwrap_or(first.peak_used_days);
        warnings.push(format!(
            "Trip breaks the {}/{} rule from {}: up to {} day(s) over the limit",
            rule.max_stay_days,
            rule.window_days,
            first.start,
            peak.saturating_sub(rule.max_stay_days)
        ));

        if max_stay > 0 {
            suggestions.push(format!(
                "Shorten the trip to {} day(s), leaving on {}",
                max_stay,
                shift(entry, i64::from(max_stay) - 1)
            ));
        }
        // No later entry date helps a trip that is too long on its own.
        if trip_days <= i64::from(rule.max_stay_days) {
            if let Some(reset) = evaluate(&merged, first.start, rule).next_reset_date {
                suggestions.push(format!(
                    "Delay entry until {}, when the oldest counted day leaves the window",
                    reset
                ));
            }
        }
    }

    if let Some(date) = first_knock_on_violation(&history, &merged, exit, rule) {
        warnings.push(format!(
            "This trip pushes later planned stays over the limit from {}",
            date
        ));
    }

    Ok(TripValidationResult {
        can_travel: violations.is_empty(),
        warnings,
        suggestions,
        max_stay_days: Some(max_stay),
        remaining_days_after_trip: remaining,
        violations,
    })
}

/// Whether staying `[entry, exit]` on top of `history` keeps every day of the
/// stay compliant. `history` must be normalized.
pub fn trip_is_compliant(
    history: &[DayInterval],
    entry: NaiveDate,
    exit: NaiveDate,
    rule: &StayRule,
) -> bool {
    let merged = merge_interval(history, DayInterval::new(entry, exit));
    find_violations(&merged, entry, exit, rule).is_empty()
}

/// Largest `n` in `1..=max_stay_days` such that a stay of `n` days from
/// `entry` is compliant, or 0.
///
/// Feasibility is monotone in `n` (a longer stay only adds days), so the
/// search stops at the first failure.
pub fn max_stay_days(history: &[DayInterval], entry: NaiveDate, rule: &StayRule) -> u32 {
    let mut best = 0;
    for n in 1..=rule.max_stay_days {
        if !trip_is_compliant(history, entry, shift(entry, i64::from(n) - 1), rule) {
            break;
        }
        best = n;
    }
    best
}

/// First day of a planned stay after the trip that the trip pushes over the
/// limit.
///
/// Only stays within one window length of `exit` can feel the trip. A stay
/// that already violated without the trip is not reported again, even if the
/// trip lengthens its violation.
fn first_knock_on_violation(
    history: &[DayInterval],
    merged: &[DayInterval],
    exit: NaiveDate,
    rule: &StayRule,
) -> Option<NaiveDate> {
    let from = shift(exit, 1);
    let to = shift(exit, rule.lookback());

    history
        .iter()
        .filter(|iv| iv.end >= from && iv.start <= to)
        .find_map(|iv| {
            let lo = iv.start.max(from);
            let hi = iv.end.min(to);
            let before = find_violations(history, lo, hi, rule);
            find_violations(merged, lo, hi, rule)
                .into_iter()
                .find(|p| !before.iter().any(|b| b.intersects(p.start, p.end)))
                .map(|p| p.start)
        })
}
