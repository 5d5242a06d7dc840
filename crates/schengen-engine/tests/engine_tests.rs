//! Tests for the configured facade and its default arguments.

use chrono::{Days, NaiveDate};
use schengen_engine::{ComplianceEngine, EngineConfig, EngineError, SchengenArea, VisitRecord};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn today() -> NaiveDate {
    d("2026-10-16")
}

fn engine() -> ComplianceEngine {
    ComplianceEngine::new(EngineConfig::default()).with_today(today())
}

// ── is_schengen_member ──────────────────────────────────────────────────────

#[test]
fn membership_uses_configured_area() {
    assert!(engine().is_schengen_member("fr"));
    assert!(!engine().is_schengen_member("RO"));

    let config = EngineConfig {
        area: SchengenArea::from_codes(["RO"]),
        ..EngineConfig::default()
    };
    let custom = ComplianceEngine::new(config).with_today(today());
    assert!(custom.is_schengen_member("RO"));
    assert!(!custom.is_schengen_member("FR"));
}

// ── compute_status ──────────────────────────────────────────────────────────

#[test]
fn status_defaults_to_today() {
    let visits = vec![VisitRecord::new("BE", d("2026-10-01"), d("2026-10-10"))];
    let status = engine().compute_status(&visits, None).unwrap();
    assert_eq!(status.reference_date, today());
    assert_eq!(status.used_days, 10);
    assert_eq!(status.remaining_days, 80);
    assert_eq!(status.next_reset_date, Some(d("2026-10-01") + Days::new(180)));
}

#[test]
fn ongoing_visit_counts_through_reference_date() {
    let visits = vec![VisitRecord::ongoing("HU", d("2026-10-07"))];
    let status = engine().compute_status(&visits, None).unwrap();
    assert_eq!(status.used_days, 10);

    let earlier = engine()
        .compute_status(&visits, Some(d("2026-10-09")))
        .unwrap();
    assert_eq!(earlier.used_days, 3);
}

#[test]
fn status_rejects_malformed_visits() {
    let visits = vec![VisitRecord::new("BE", d("2026-10-10"), d("2026-10-01"))];
    let err = engine().compute_status(&visits, None).unwrap_err();
    assert!(matches!(err, EngineError::InvalidVisit { .. }));
}

// ── find_violations ─────────────────────────────────────────────────────────

#[test]
fn violations_default_range_covers_whole_history() {
    let visits = vec![
        VisitRecord::new("IT", d("2026-01-01"), d("2026-04-30")),
        VisitRecord::new("GR", d("2026-05-01"), d("2026-05-05")),
    ];
    let periods = engine().find_violations(&visits, None, None).unwrap();
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].start, d("2026-01-01") + Days::new(90));
    assert_eq!(periods[0].peak_used_days, 125);
}

#[test]
fn violations_include_planned_future_stays() {
    let visits = vec![VisitRecord::new("IT", d("2027-01-01"), d("2027-04-30"))];
    let periods = engine().find_violations(&visits, None, None).unwrap();
    assert_eq!(periods.len(), 1);
    assert!(periods[0].start > today());
}

#[test]
fn violations_respect_explicit_range() {
    let visits = vec![VisitRecord::new("IT", d("2026-01-01"), d("2026-04-30"))];
    let periods = engine()
        .find_violations(&visits, Some(d("2026-02-01")), Some(d("2026-03-31")))
        .unwrap();
    assert!(periods.is_empty());
}

#[test]
fn violations_of_empty_history_are_empty() {
    assert!(engine().find_violations(&[], None, None).unwrap().is_empty());
}

#[test]
fn violations_are_idempotent() {
    let visits = vec![
        VisitRecord::new("IT", d("2026-01-01"), d("2026-03-15")),
        VisitRecord::new("FR", d("2026-03-20"), d("2026-05-10")),
    ];
    let first = engine().find_violations(&visits, None, None).unwrap();
    let second = engine().find_violations(&visits, None, None).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

// ── validate_future_trip ────────────────────────────────────────────────────

#[test]
fn facade_validates_with_pinned_today() {
    let visits = vec![VisitRecord::new("FR", today() - Days::new(84), today())];
    let result = engine()
        .validate_future_trip(
            &visits,
            today() + Days::new(1),
            today() + Days::new(10),
            "DE",
        )
        .unwrap();
    assert!(!result.can_travel);
    assert_eq!(result.max_stay_days, Some(5));
}

// ── find_safe_window ────────────────────────────────────────────────────────

#[test]
fn safe_window_defaults_to_tomorrow() {
    let window = engine().find_safe_window(&[], 14, None, None).unwrap().unwrap();
    assert_eq!(window.start_date, today() + Days::new(1));
    assert_eq!(window.end_date, today() + Days::new(14));
}

#[test]
fn safe_window_uses_configured_horizon() {
    let config = EngineConfig {
        search_horizon_days: 30,
        ..EngineConfig::default()
    };
    let engine = ComplianceEngine::new(config).with_today(today());
    let visits = vec![VisitRecord::new("FR", today() - Days::new(89), today())];

    assert_eq!(engine.find_safe_window(&visits, 30, None, None).unwrap(), None);
    assert!(engine
        .find_safe_window(&visits, 30, None, Some(365))
        .unwrap()
        .is_some());
}

#[test]
fn safe_window_rejects_bad_duration() {
    let err = engine().find_safe_window(&[], 120, None, None).unwrap_err();
    assert_eq!(err, EngineError::InvalidDuration { days: 120, max: 90 });
}

// ── Clock ───────────────────────────────────────────────────────────────────

#[test]
fn unpinned_engine_reads_the_clock() {
    let engine = ComplianceEngine::new(EngineConfig::default());
    assert!(engine.today().is_ok());
}

#[test]
fn bad_timezone_surfaces_on_clock_read() {
    let config = EngineConfig {
        timezone: "Nowhere/Special".to_string(),
        ..EngineConfig::default()
    };
    let engine = ComplianceEngine::new(config);
    assert_eq!(
        engine.compute_status(&[], None).unwrap_err(),
        EngineError::InvalidTimezone("Nowhere/Special".to_string())
    );
}
