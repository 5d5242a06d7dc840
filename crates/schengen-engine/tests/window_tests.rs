//! Tests for trailing-window evaluation.

use chrono::{Days, NaiveDate};
use schengen_engine::interval::DayInterval;
use schengen_engine::window::{evaluate, used_days};
use schengen_engine::StayRule;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn iv(start: &str, end: &str) -> DayInterval {
    DayInterval::new(d(start), d(end))
}

/// A stay of `days` days starting on `start`.
fn stay(start: NaiveDate, days: u64) -> DayInterval {
    DayInterval::new(start, start + Days::new(days - 1))
}

fn rule() -> StayRule {
    StayRule::default()
}

// ── 90-day boundary ─────────────────────────────────────────────────────────

#[test]
fn ninety_day_stay_is_compliant() {
    let day1 = d("2026-01-01");
    let intervals = vec![stay(day1, 90)];
    let last_day = day1 + Days::new(89);

    let status = evaluate(&intervals, last_day, &rule());
    assert_eq!(status.used_days, 90);
    assert_eq!(status.remaining_days, 0);
    assert!(status.is_compliant);
}

#[test]
fn ninety_one_day_stay_is_not_compliant() {
    let day1 = d("2026-01-01");
    let intervals = vec![stay(day1, 91)];
    let last_day = day1 + Days::new(90);

    let status = evaluate(&intervals, last_day, &rule());
    assert_eq!(status.used_days, 91);
    assert_eq!(status.remaining_days, 0);
    assert!(!status.is_compliant);
}

// ── 180-day rollout ─────────────────────────────────────────────────────────

#[test]
fn ninety_day_stay_rolls_out_by_day_271() {
    let day1 = d("2026-01-01");
    let intervals = vec![stay(day1, 90)];

    // Day 271 is day1 + 270.
    let day271 = day1 + Days::new(270);
    let status = evaluate(&intervals, day271, &rule());
    assert_eq!(status.used_days, 0);
    assert_eq!(status.remaining_days, 90);
    assert_eq!(status.next_reset_date, None);

    // One day earlier the last day of the stay is still counted.
    let day270 = day1 + Days::new(269);
    assert_eq!(used_days(&intervals, day270, &rule()), 1);
}

#[test]
fn usage_drops_one_day_at_a_time_after_day_180() {
    let day1 = d("2026-01-01");
    let intervals = vec![stay(day1, 90)];
    assert_eq!(used_days(&intervals, day1 + Days::new(179), &rule()), 90);
    assert_eq!(used_days(&intervals, day1 + Days::new(180), &rule()), 89);
    assert_eq!(used_days(&intervals, day1 + Days::new(181), &rule()), 88);
}

// ── next_reset_date ─────────────────────────────────────────────────────────

#[test]
fn next_reset_is_oldest_counted_day_plus_180() {
    let intervals = vec![iv("2026-01-10", "2026-01-20"), iv("2026-03-01", "2026-03-05")];
    let status = evaluate(&intervals, d("2026-04-01"), &rule());
    assert_eq!(status.used_days, 16);
    assert_eq!(status.next_reset_date, Some(d("2026-01-10") + Days::new(180)));
}

#[test]
fn next_reset_uses_window_start_when_stay_is_partly_outside() {
    let intervals = vec![iv("2025-12-01", "2026-02-28")];
    let reference = d("2026-06-15");
    let status = evaluate(&intervals, reference, &rule());
    let oldest_counted = status.window_start;
    assert!(oldest_counted > d("2025-12-01"));
    assert_eq!(status.next_reset_date, Some(oldest_counted + Days::new(180)));
    assert_eq!(
        status.used_days as i64,
        (d("2026-02-28") - oldest_counted).num_days() + 1
    );
}

#[test]
fn no_usage_means_no_reset_date() {
    let status = evaluate(&[], d("2026-04-01"), &rule());
    assert_eq!(status.used_days, 0);
    assert_eq!(status.remaining_days, 90);
    assert!(status.is_compliant);
    assert_eq!(status.next_reset_date, None);
}

// ── Clipping ────────────────────────────────────────────────────────────────

#[test]
fn future_days_are_not_counted() {
    let intervals = vec![iv("2026-04-01", "2026-04-30")];
    let status = evaluate(&intervals, d("2026-04-10"), &rule());
    assert_eq!(status.used_days, 10);
}

#[test]
fn window_start_is_179_days_before_reference() {
    let status = evaluate(&[], d("2026-06-29"), &rule());
    assert_eq!(status.window_start, d("2026-06-29") - Days::new(179));
    assert_eq!(status.reference_date, d("2026-06-29"));
}

#[test]
fn custom_rule_changes_limits() {
    let short = StayRule {
        max_stay_days: 30,
        window_days: 60,
    };
    let intervals = vec![iv("2026-01-01", "2026-01-31")];
    let status = evaluate(&intervals, d("2026-01-31"), &short);
    assert_eq!(status.used_days, 31);
    assert!(!status.is_compliant);
    assert_eq!(status.next_reset_date, Some(d("2026-03-02")));
}
