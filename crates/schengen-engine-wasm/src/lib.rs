//! WASM bindings for schengen-engine.
//!
//! Exposes membership checks, compliance status, violation scanning, trip
//! validation and safe-window search to JavaScript via `wasm-bindgen`. Visit
//! lists and results cross the boundary as JSON strings; dates are
//! `YYYY-MM-DD` strings. Every call takes an explicit `today`, so the module
//! never reads a clock.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schengen-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/schengen-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/schengen_engine_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/schengen-engine-js/wasm/schengen_engine_wasm.js \
//!    packages/schengen-engine-js/wasm/schengen_engine_wasm.cjs
//! ```

use chrono::NaiveDate;
use schengen_engine::{ComplianceEngine, EngineConfig, VisitRecord};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` date string.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.parse().map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_optional_date(s: Option<String>) -> Result<Option<NaiveDate>, String> {
    s.as_deref().map(parse_date).transpose()
}

/// Convert a JSON array of `{country, entry_date, exit_date?}` objects.
fn parse_visits_json(json: &str) -> Result<Vec<VisitRecord>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid visits JSON: {}", e))
}

fn engine(today: &str) -> Result<ComplianceEngine, String> {
    Ok(ComplianceEngine::new(EngineConfig::default()).with_today(parse_date(today)?))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Boundary-free implementations
// ---------------------------------------------------------------------------

fn compute_status_json(
    visits_json: &str,
    today: &str,
    reference: Option<String>,
) -> Result<String, String> {
    let visits = parse_visits_json(visits_json)?;
    let status = engine(today)?
        .compute_status(&visits, parse_optional_date(reference)?)
        .map_err(|e| e.to_string())?;
    to_json(&status)
}

fn find_violations_json(
    visits_json: &str,
    today: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<String, String> {
    let visits = parse_visits_json(visits_json)?;
    let periods = engine(today)?
        .find_violations(&visits, parse_optional_date(from)?, parse_optional_date(to)?)
        .map_err(|e| e.to_string())?;
    to_json(&periods)
}

fn validate_future_trip_json(
    visits_json: &str,
    today: &str,
    entry: &str,
    exit: &str,
    country: &str,
) -> Result<String, String> {
    let visits = parse_visits_json(visits_json)?;
    let result = engine(today)?
        .validate_future_trip(&visits, parse_date(entry)?, parse_date(exit)?, country)
        .map_err(|e| e.to_string())?;
    to_json(&result)
}

fn find_safe_window_json(
    visits_json: &str,
    today: &str,
    duration_days: u32,
    search_start: Option<String>,
    horizon_days: Option<u32>,
) -> Result<String, String> {
    let visits = parse_visits_json(visits_json)?;
    let window = engine(today)?
        .find_safe_window(
            &visits,
            duration_days,
            parse_optional_date(search_start)?,
            horizon_days,
        )
        .map_err(|e| e.to_string())?;
    to_json(&window)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether an ISO 3166-1 alpha-2 code belongs to the Schengen Area.
#[wasm_bindgen(js_name = "isSchengenMember")]
pub fn is_schengen_member(country: &str) -> bool {
    schengen_engine::is_schengen_member(country)
}

/// Compliance figures at `reference` (defaults to `today`).
///
/// Returns a JSON object with `reference_date`, `window_start`, `used_days`,
/// `remaining_days`, `is_compliant` and `next_reset_date`.
#[wasm_bindgen(js_name = "computeStatus")]
pub fn compute_status(
    visits_json: &str,
    today: &str,
    reference: Option<String>,
) -> Result<String, JsValue> {
    compute_status_json(visits_json, today, reference).map_err(|e| JsValue::from_str(&e))
}

/// All violation periods in `[from, to]`. Returns a JSON array of
/// `{start, end, peak_used_days}` objects.
#[wasm_bindgen(js_name = "findViolations")]
pub fn find_violations(
    visits_json: &str,
    today: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<String, JsValue> {
    find_violations_json(visits_json, today, from, to).map_err(|e| JsValue::from_str(&e))
}

/// Validate a planned trip. Returns a JSON object with `can_travel`,
/// `warnings`, `suggestions`, `max_stay_days` (null = unbounded),
/// `remaining_days_after_trip` and `violations`.
#[wasm_bindgen(js_name = "validateFutureTrip")]
pub fn validate_future_trip(
    visits_json: &str,
    today: &str,
    entry: &str,
    exit: &str,
    country: &str,
) -> Result<String, JsValue> {
    validate_future_trip_json(visits_json, today, entry, exit, country)
        .map_err(|e| JsValue::from_str(&e))
}

/// First compliant window of `duration_days`. Returns a JSON object with
/// `start_date`, `end_date` and `duration_days`, or `null` when the horizon
/// is exhausted.
#[wasm_bindgen(js_name = "findSafeWindow")]
pub fn find_safe_window(
    visits_json: &str,
    today: &str,
    duration_days: u32,
    search_start: Option<String>,
    horizon_days: Option<u32>,
) -> Result<String, JsValue> {
    find_safe_window_json(visits_json, today, duration_days, search_start, horizon_days)
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISITS: &str = r#"[
        {"country": "FR", "entry_date": "2026-07-23", "exit_date": "2026-10-16"}
    ]"#;

    #[test]
    fn status_round_trips_through_json() {
        let json = compute_status_json(VISITS, "2026-10-16", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["used_days"], 86);
        assert_eq!(value["remaining_days"], 4);
    }

    #[test]
    fn safe_window_is_null_when_horizon_is_short() {
        let json = find_safe_window_json(VISITS, "2026-10-16", 30, None, Some(5)).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn trip_validation_reports_max_stay() {
        let json =
            validate_future_trip_json(VISITS, "2026-10-16", "2026-10-17", "2026-10-30", "AT")
                .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["can_travel"], false);
        assert_eq!(value["max_stay_days"], 4);
    }

    #[test]
    fn bad_date_is_reported() {
        let err = compute_status_json(VISITS, "16.10.2026", None).unwrap_err();
        assert!(err.starts_with("Invalid date '16.10.2026'"));
    }

    #[test]
    fn bad_json_is_reported() {
        let err = find_violations_json("{", "2026-10-16", None, None).unwrap_err();
        assert!(err.starts_with("Invalid visits JSON"));
    }
}
