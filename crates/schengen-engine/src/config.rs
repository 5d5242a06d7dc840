//! Engine configuration: stay-rule parameters, membership set, search horizon,
//! and the timezone used to decide what "today" is.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! timezone = "UTC"
//! search_horizon_days = 365
//!
//! [rule]
//! max_stay_days = 90
//! window_days = 180
//!
//! [area]
//! members = ["AT", "BE", "CH"]
//! ```

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::area::SchengenArea;
use crate::error::{EngineError, Result};

/// The rolling-window stay rule: at most `max_stay_days` inside any
/// `window_days`-day trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StayRule {
    pub max_stay_days: u32,
    pub window_days: u32,
}

impl Default for StayRule {
    fn default() -> Self {
        Self {
            max_stay_days: 90,
            window_days: 180,
        }
    }
}

impl StayRule {
    /// Offset from a reference date back to the first day of its window.
    pub(crate) fn lookback(&self) -> i64 {
        i64::from(self.window_days) - 1
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rule: StayRule,
    pub area: SchengenArea,
    /// Number of candidate start dates the safe-window search examines.
    pub search_horizon_days: u32,
    /// IANA timezone in which "today" is resolved.
    pub timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rule: StayRule::default(),
            area: SchengenArea::default(),
            search_horizon_days: 365,
            timezone: "UTC".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// Returns `EngineError::Config` on malformed TOML or inconsistent rule
    /// parameters, `EngineError::InvalidTimezone` on an unknown IANA zone.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the rule is satisfiable and the timezone resolves.
    pub fn validate(&self) -> Result<()> {
        if self.rule.max_stay_days == 0 {
            return Err(EngineError::Config(
                "rule.max_stay_days must be at least 1".to_string(),
            ));
        }
        if self.rule.max_stay_days >= self.rule.window_days {
            return Err(EngineError::Config(format!(
                "rule.max_stay_days ({}) must be smaller than rule.window_days ({})",
                self.rule.max_stay_days, self.rule.window_days
            )));
        }
        self.tz().map(|_| ())
    }

    /// The configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| EngineError::InvalidTimezone(self.timezone.clone()))
    }

    /// The current civil date in the configured timezone.
    ///
    /// This is the only place a wall-clock instant is turned into a date.
    pub fn today(&self) -> Result<NaiveDate> {
        let tz = self.tz()?;
        Ok(Utc::now().with_timezone(&tz).date_naive())
    }
}
