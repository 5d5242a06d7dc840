//! # schengen-engine
//!
//! Deterministic Schengen 90/180-day compliance calculations.
//!
//! Given a traveler's visit history, the engine computes how many days of the
//! trailing 180-day window were spent inside the Schengen Area, finds past
//! violation periods, validates a planned trip before it is booked, and
//! searches for the first future window of a given length that stays
//! compliant. Every function is pure over its inputs; dates are civil
//! [`chrono::NaiveDate`] values throughout.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use schengen_engine::{ComplianceEngine, EngineConfig, VisitRecord};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
//! let engine = ComplianceEngine::new(EngineConfig::default()).with_today(today);
//!
//! let visits = vec![VisitRecord::new(
//!     "FR",
//!     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 3, 30).unwrap(),
//! )];
//!
//! let status = engine.compute_status(&visits, None).unwrap();
//! assert_eq!(status.used_days, 30);
//! assert_eq!(status.remaining_days, 60);
//! ```
//!
//! ## Modules
//!
//! - [`area`] -- Schengen membership classification
//! - [`interval`] -- Visit list → merged day intervals
//! - [`window`] -- Trailing-window usage at a reference date
//! - [`violation`] -- Breakpoint scan for non-compliant periods
//! - [`trip`] -- Validate a hypothetical trip
//! - [`safe_window`] -- Forward search for a compliant window
//! - [`engine`] -- Configured facade over the operations above
//! - [`config`] -- Rule parameters, membership set, timezone
//! - [`error`] -- Error types

pub mod area;
pub mod config;
pub mod engine;
pub mod error;
pub mod interval;
pub mod safe_window;
pub mod trip;
pub mod violation;
pub mod visit;
pub mod window;

pub use area::{is_schengen_member, SchengenArea};
pub use config::{EngineConfig, StayRule};
pub use engine::ComplianceEngine;
pub use error::EngineError;
pub use interval::{normalize, DayInterval};
pub use safe_window::{find_safe_window, SafeWindow};
pub use trip::{validate_future_trip, TripValidationResult};
pub use violation::{find_violations, ViolationPeriod};
pub use visit::VisitRecord;
pub use window::{evaluate, ComplianceStatus};
