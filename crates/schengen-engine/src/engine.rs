//! Configured entry point bundling the five public operations.
//!
//! [`ComplianceEngine`] binds an [`EngineConfig`] and a source for "today" and
//! fills in the optional arguments of each operation. It holds no other state:
//! every call normalizes the visit list it is given from scratch.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::interval::normalize;
use crate::safe_window::{self, SafeWindow};
use crate::trip::{self, TripValidationResult};
use crate::violation::{self, ViolationPeriod};
use crate::visit::VisitRecord;
use crate::window::{self, ComplianceStatus};

#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    config: EngineConfig,
    today: Option<NaiveDate>,
}

impl ComplianceEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Pin "today" instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The pinned date, or the current date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        match self.today {
            Some(date) => Ok(date),
            None => self.config.today(),
        }
    }

    pub fn is_schengen_member(&self, country: &str) -> bool {
        self.config.area.is_member(country)
    }

    /// Usage figures at `reference` (default: today). Ongoing visits end at
    /// the reference date.
    #[instrument(skip_all, fields(visits = visits.len()), err(Display))]
    pub fn compute_status(
        &self,
        visits: &[VisitRecord],
        reference: Option<NaiveDate>,
    ) -> Result<ComplianceStatus> {
        let reference = match reference {
            Some(date) => date,
            None => self.today()?,
        };
        let intervals = normalize(visits, reference, &self.config.area)?;
        let status = window::evaluate(&intervals, reference, &self.config.rule);
        debug!(
            %reference,
            used = status.used_days,
            compliant = status.is_compliant,
            "status computed"
        );
        Ok(status)
    }

    /// Violation periods in `[from, to]`.
    ///
    /// `from` defaults to the first day of presence; `to` defaults to the later
    /// of today and the last day of presence. Usage only falls after the last
    /// stay ends, so nothing is missed past that point.
    #[instrument(skip_all, fields(visits = visits.len()), err(Display))]
    pub fn find_violations(
        &self,
        visits: &[VisitRecord],
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ViolationPeriod>> {
        let today = self.today()?;
        let intervals = normalize(visits, today, &self.config.area)?;
        let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
            return Ok(Vec::new());
        };
        let from = from.unwrap_or(first.start);
        let to = to.unwrap_or(today.max(last.end));

        let periods = violation::find_violations(&intervals, from, to, &self.config.rule);
        debug!(%from, %to, found = periods.len(), "violation scan complete");
        Ok(periods)
    }

    #[instrument(skip_all, fields(entry = %entry, exit = %exit, country = %country), err(Display))]
    pub fn validate_future_trip(
        &self,
        visits: &[VisitRecord],
        entry: NaiveDate,
        exit: NaiveDate,
        country: &str,
    ) -> Result<TripValidationResult> {
        let today = self.today()?;
        let result = trip::validate_future_trip(visits, entry, exit, country, today, &self.config)?;
        debug!(
            can_travel = result.can_travel,
            max_stay = ?result.max_stay_days,
            "trip validated"
        );
        Ok(result)
    }

    /// First compliant window of `duration_days` starting no earlier than
    /// `search_start` (default: tomorrow) within `horizon_days` candidates
    /// (default: the configured horizon).
    #[instrument(skip_all, fields(duration_days = duration_days), err(Display))]
    pub fn find_safe_window(
        &self,
        visits: &[VisitRecord],
        duration_days: u32,
        search_start: Option<NaiveDate>,
        horizon_days: Option<u32>,
    ) -> Result<Option<SafeWindow>> {
        let today = self.today()?;
        let search_start = match search_start {
            Some(date) => date,
            None => today.succ_opt().unwrap_or(today),
        };
        let horizon = horizon_days.unwrap_or(self.config.search_horizon_days);

        let found = safe_window::find_safe_window(
            visits,
            duration_days,
            search_start,
            horizon,
            today,
            &self.config,
        )?;
        match &found {
            Some(w) => debug!(start = %w.start_date, end = %w.end_date, "safe window found"),
            None => debug!(%search_start, horizon, "no safe window within horizon"),
        }
        Ok(found)
    }
}
