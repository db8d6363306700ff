use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use sprintcal::aggregate::SkippedRecord;
use sprintcal::calendar::format::parse_locale;
use sprintcal::cli::{parse_date, parse_sprint};
use sprintcal::clock::effective_today;
use sprintcal::{IsoYear, SprintCalendar};

use crate::error::{ReportError, Result};
use crate::input::load_weekly_records;
use crate::reports::{self, SprintSelection};

#[derive(Parser, Debug)]
#[command(
    name = "sprintcal-report",
    version,
    about = "Sprint-level reports over weekly-bucketed JSON data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference date (YYYY-MM-DD) used instead of today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Locale for month names
    #[arg(long, global = true, default_value = "fr_FR")]
    pub locale: String,

    /// Fail when any weekly record cannot be placed on the sprint calendar
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the sprints present in a weekly data file
    Sprints {
        /// JSON file holding an array of weekly records
        file: PathBuf,
        /// Number of sprints to show
        #[arg(long, default_value = "6")]
        min: usize,
    },

    /// Sum a numeric field per sprint
    Velocity {
        /// JSON file holding an array of weekly records
        file: PathBuf,
        /// Payload field to sum
        #[arg(long)]
        field: String,
        /// Sprint numbers to report, in order (defaults to every sprint in the data)
        #[arg(long = "sprint", allow_negative_numbers = true)]
        sprints: Vec<i64>,
        /// Only count records of this ISO year
        #[arg(long)]
        year: Option<IsoYear>,
    },

    /// Show version
    Version,
}

/// Shared flags resolved once per invocation.
pub struct Options {
    pub calendar: SprintCalendar,
    pub today: chrono::NaiveDate,
    pub strict: bool,
    pub json_output: bool,
}

impl Options {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let calendar = SprintCalendar::new(parse_locale(&cli.locale)?);
        let today = effective_today(cli.today.as_deref().map(parse_date).transpose()?);
        Ok(Self {
            calendar,
            today,
            strict: cli.strict,
            json_output: cli.json,
        })
    }
}

fn check_skipped(options: &Options, skipped: &[SkippedRecord]) -> Result<()> {
    if skipped.is_empty() {
        return Ok(());
    }
    if options.strict {
        for entry in skipped {
            eprintln!("  record {}: {}", entry.index, entry.reason);
        }
        return Err(ReportError::MalformedRecords {
            count: skipped.len(),
        });
    }
    tracing::warn!(count = skipped.len(), "skipped weekly records");
    Ok(())
}

// --- Command implementations ---

pub fn sprints(options: &Options, file: &Path, min: usize) -> Result<()> {
    let decoded = load_weekly_records(file)?;
    let mut report = reports::calculate_sprints(&options.calendar, &decoded.records, min, options.today)?;

    decoded.to_input_indices(&mut report.skipped);
    let mut skipped = decoded.skipped;
    skipped.append(&mut report.skipped);
    skipped.sort_by_key(|entry| entry.index);
    check_skipped(options, &skipped)?;
    report.skipped = skipped;

    if options.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", reports::render_sprints_text(&report));
    }
    Ok(())
}

pub fn velocity(
    options: &Options,
    file: &Path,
    field: &str,
    sprints: &[i64],
    year: Option<IsoYear>,
) -> Result<()> {
    let selection = if sprints.is_empty() {
        SprintSelection::FromData
    } else {
        SprintSelection::Numbers {
            sprints: sprints
                .iter()
                .map(|&s| parse_sprint(s))
                .collect::<sprintcal::Result<Vec<_>>>()?,
            year,
        }
    };

    let decoded = load_weekly_records(file)?;
    let mut report = reports::calculate_velocity(&options.calendar, &decoded.records, field, &selection);

    decoded.to_input_indices(&mut report.skipped);
    let mut skipped = decoded.skipped;
    skipped.append(&mut report.skipped);
    skipped.sort_by_key(|entry| entry.index);
    check_skipped(options, &skipped)?;
    report.skipped = skipped;

    if selection == SprintSelection::FromData && report.sprints.is_empty() {
        return Err(ReportError::NoSprints);
    }

    if options.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", reports::render_velocity_text(&report));
    }
    Ok(())
}

pub fn version() -> Result<()> {
    println!("sprintcal-report {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

pub fn default_action() -> Result<()> {
    println!("sprintcal-report — sprint-level reports over weekly data.");
    println!();
    println!("Run `sprintcal-report --help` for usage.");
    Ok(())
}
