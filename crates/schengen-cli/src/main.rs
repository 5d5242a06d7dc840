//! `schengen` CLI: run the 90/180-day compliance engine over a visit file.
//!
//! ## Usage
//!
//! ```sh
//! # Is a country part of the Schengen Area?
//! schengen member HR
//!
//! # Usage figures as of today (visits read from stdin)
//! cat visits.json | schengen status
//!
//! # Usage figures on a given date, from a file
//! schengen status -i visits.json --date 2026-06-30
//!
//! # All violation periods, as JSON
//! schengen --json violations -i visits.json
//!
//! # Can I spend 10 days in Italy from November 1st?
//! schengen validate -i visits.json --entry 2026-11-01 --exit 2026-11-10 --country IT
//!
//! # First 30-day window that stays compliant
//! schengen window -i visits.json --days 30
//! ```
//!
//! Visit files are JSON arrays of `{"country", "entry_date", "exit_date"}`
//! objects with `YYYY-MM-DD` dates; omit `exit_date` for an ongoing stay.
//! Log output goes to stderr and is controlled by `RUST_LOG`.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use schengen_engine::{
    ComplianceEngine, ComplianceStatus, EngineConfig, SafeWindow, TripValidationResult,
    ViolationPeriod, VisitRecord,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "schengen",
    version,
    about = "Schengen 90/180-day compliance calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (rule, member states, timezone, search horizon)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Use this date as today instead of the clock (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Print the result as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a country code belongs to the Schengen Area
    Member {
        /// ISO 3166-1 alpha-2 country code
        country: String,
    },
    /// Show used and remaining days for a reference date
    Status {
        /// Visit file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reference date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List every period in which the 90-day limit was exceeded
    Violations {
        /// Visit file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First date to scan (defaults to the first day of presence)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date to scan (defaults to today or the last day of presence)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Check a planned trip before booking it
    Validate {
        /// Visit file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First day of the trip
        #[arg(long)]
        entry: NaiveDate,
        /// Last day of the trip
        #[arg(long)]
        exit: NaiveDate,
        /// Destination country code
        #[arg(long)]
        country: String,
    },
    /// Find the first compliant window of a given length
    Window {
        /// Visit file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Length of the stay in days (1-90)
        #[arg(long)]
        days: u32,
        /// Earliest start date (defaults to tomorrow)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Number of start dates to try (defaults to the configured horizon)
        #[arg(long)]
        horizon: Option<u32>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let engine = build_engine(cli.config.as_deref(), cli.today)?;

    match cli.command {
        Commands::Member { country } => {
            let member = engine.is_schengen_member(&country);
            if cli.json {
                print_json(&serde_json::json!({ "country": country, "member": member }))?;
            } else if member {
                println!("{} is a Schengen member", country);
            } else {
                println!("{} is not a Schengen member", country);
            }
        }
        Commands::Status { input, date } => {
            let visits = read_visits(input.as_deref())?;
            let status = engine
                .compute_status(&visits, date)
                .context("Failed to compute status")?;
            if cli.json {
                print_json(&status)?;
            } else {
                print_status(&status);
            }
        }
        Commands::Violations { input, from, to } => {
            let visits = read_visits(input.as_deref())?;
            let periods = engine
                .find_violations(&visits, from, to)
                .context("Failed to scan for violations")?;
            if cli.json {
                print_json(&periods)?;
            } else {
                print_violations(&periods);
            }
        }
        Commands::Validate {
            input,
            entry,
            exit,
            country,
        } => {
            let visits = read_visits(input.as_deref())?;
            let result = engine
                .validate_future_trip(&visits, entry, exit, &country)
                .context("Failed to validate trip")?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_validation(&result);
            }
        }
        Commands::Window {
            input,
            days,
            start,
            horizon,
        } => {
            let visits = read_visits(input.as_deref())?;
            let window = engine
                .find_safe_window(&visits, days, start, horizon)
                .context("Failed to search for a safe window")?;
            if cli.json {
                print_json(&window)?;
            } else {
                print_window(window.as_ref());
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn build_engine(config_path: Option<&str>, today: Option<NaiveDate>) -> Result<ComplianceEngine> {
    let config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            EngineConfig::from_toml_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => EngineConfig::default(),
    };

    let engine = ComplianceEngine::new(config);
    Ok(match today {
        Some(date) => engine.with_today(date),
        None => engine,
    })
}

fn read_visits(path: Option<&str>) -> Result<Vec<VisitRecord>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    let visits: Vec<VisitRecord> =
        serde_json::from_str(&raw).context("Failed to parse visit list JSON")?;
    debug!(source = path.unwrap_or("stdin"), visits = visits.len(), "visit list loaded");
    Ok(visits)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_status(status: &ComplianceStatus) {
    println!("Reference date:  {}", status.reference_date);
    println!("Window:          {} to {}", status.window_start, status.reference_date);
    println!("Used days:       {}", status.used_days);
    println!("Remaining days:  {}", status.remaining_days);
    println!(
        "Compliant:       {}",
        if status.is_compliant { "yes" } else { "no" }
    );
    match status.next_reset_date {
        Some(date) => println!("Next reset:      {}", date),
        None => println!("Next reset:      -"),
    }
}

fn print_violations(periods: &[ViolationPeriod]) {
    if periods.is_empty() {
        println!("No violations");
        return;
    }
    for p in periods {
        println!("{} to {}  peak {} days", p.start, p.end, p.peak_used_days);
    }
}

fn print_validation(result: &TripValidationResult) {
    println!("Can travel:      {}", if result.can_travel { "yes" } else { "no" });
    match result.max_stay_days {
        Some(days) => println!("Max stay:        {} days", days),
        None => println!("Max stay:        unlimited"),
    }
    println!("Remaining after: {} days", result.remaining_days_after_trip);
    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    for suggestion in &result.suggestions {
        println!("suggestion: {}", suggestion);
    }
}

fn print_window(window: Option<&SafeWindow>) {
    match window {
        Some(w) => println!(
            "{} to {} ({} days)",
            w.start_date, w.end_date, w.duration_days
        ),
        None => println!("No compliant window within the search horizon"),
    }
}
