//! Search forward for the first compliant window of a requested length.
//!
//! The search is area-wide: each candidate is inserted into the history as a
//! member-state interval directly, so no particular country is involved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::interval::{normalize, shift};
use crate::trip::trip_is_compliant;
use crate::visit::VisitRecord;

/// A compliant stay of `duration_days` days, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
}

/// Find the earliest start in `search_start .. search_start + horizon_days`
/// from which a `duration_days`-day stay stays compliant.
///
/// Running out of horizon is a normal outcome and returns `Ok(None)`.
///
/// # Errors
/// Returns `EngineError::InvalidDuration` unless
/// `1 <= duration_days <= max_stay_days`, and `EngineError::InvalidVisit` for
/// malformed history.
pub fn find_safe_window(
    visits: &[VisitRecord],
    duration_days: u32,
    search_start: NaiveDate,
    horizon_days: u32,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<Option<SafeWindow>> {
    let rule = &config.rule;
    if duration_days == 0 || duration_days > rule.max_stay_days {
        return Err(EngineError::InvalidDuration {
            days: duration_days,
            max: rule.max_stay_days,
        });
    }

    let history = normalize(visits, today, &config.area)?;
    let span = i64::from(duration_days) - 1;

    for k in 0..i64::from(horizon_days) {
        let start_date = shift(search_start, k);
        let end_date = shift(start_date, span);
        if trip_is_compliant(&history, start_date, end_date, rule) {
            return Ok(Some(SafeWindow {
                start_date,
                end_date,
                duration_days,
            }));
        }
        trace!(%start_date, "candidate window not compliant");
    }

    Ok(None)
}
