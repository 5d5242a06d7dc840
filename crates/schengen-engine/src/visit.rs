//! Visit records as supplied by the caller's store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One stay in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// First day present (inclusive).
    pub entry_date: NaiveDate,
    /// Last day present (inclusive). `None` means the visit is ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
}

impl VisitRecord {
    /// A completed visit.
    pub fn new(country: impl Into<String>, entry_date: NaiveDate, exit_date: NaiveDate) -> Self {
        Self {
            country: country.into(),
            entry_date,
            exit_date: Some(exit_date),
        }
    }

    /// A visit with no exit date yet.
    pub fn ongoing(country: impl Into<String>, entry_date: NaiveDate) -> Self {
        Self {
            country: country.into(),
            entry_date,
            exit_date: None,
        }
    }

    /// Reject a visit whose exit precedes its entry.
    pub fn validate(&self) -> Result<()> {
        match self.exit_date {
            Some(exit) if exit < self.entry_date => Err(EngineError::InvalidVisit {
                country: self.country.clone(),
                entry: self.entry_date,
                exit,
            }),
            _ => Ok(()),
        }
    }
}
