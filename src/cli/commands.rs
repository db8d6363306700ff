use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;

use crate::calendar::format::parse_locale;
use crate::calendar::mapping::{SPRINTS_PER_YEAR, SprintNumber, sprint_from_week, sprint_weeks};
use crate::calendar::{iso_year, week_number};
use crate::clock::effective_today;
use crate::error::{Result, SprintError};
use crate::model::{Settings, SprintRecord};
use crate::resolver::SprintCalendar;
use crate::storage::{SettingsOrigin, SettingsStore};

#[derive(Parser, Debug)]
#[command(
    name = "sprintcal",
    version,
    about = "Two-week sprints on the ISO week calendar."
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

    /// Locale for month names (e.g. fr_FR, en-US, de)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Path to a settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the sprint containing today
    Current,

    /// Show the sprint before the current one
    Previous,

    /// List recent sprints, newest first
    History {
        /// Number of sprints (defaults to the configured history count)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Show the two ISO weeks of a sprint
    Weeks {
        /// Sprint number
        #[arg(allow_negative_numbers = true)]
        sprint: i64,
    },

    /// Show the dates of a sprint in the current calendar year
    Range {
        /// Sprint number
        #[arg(allow_negative_numbers = true)]
        sprint: i64,
    },

    /// Show the ISO week, ISO year and sprint of a date
    Week {
        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },

    /// Settings file management
    Config {
        #[command(subcommand)]
        command: ConfigCmd,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Print the effective settings
    Show,
    /// Write a default settings file
    Init,
}

/// Everything a calendar command needs, resolved once per invocation.
pub struct Session {
    pub calendar: SprintCalendar,
    pub settings: Settings,
    pub today: NaiveDate,
}

impl Session {
    pub fn open(store: &SettingsStore, locale: Option<&str>, today: Option<&str>) -> Result<Self> {
        let (mut settings, _) = store.load()?;
        if let Some(locale) = locale {
            settings.locale = locale.to_string();
        }
        let calendar = SprintCalendar::new(settings.locale()?);
        let today = effective_today(today.map(parse_date).transpose()?);
        Ok(Self {
            calendar,
            settings,
            today,
        })
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| SprintError::InvalidDate(format!("expected YYYY-MM-DD, got {value}")))
}

/// Sprint number from user input, 1..=26.
pub fn parse_sprint(value: i64) -> Result<SprintNumber> {
    SprintNumber::try_from(value)
        .ok()
        .filter(|sprint| (1..=SPRINTS_PER_YEAR).contains(sprint))
        .ok_or(SprintError::InvalidSprint(value))
}

// --- Command implementations ---

pub fn current(session: &Session, json_output: bool) -> Result<()> {
    let sprint = session.calendar.current_sprint(session.today)?;
    print_sprint(&sprint, json_output)
}

pub fn previous(session: &Session, json_output: bool) -> Result<()> {
    let sprint = session.calendar.previous_sprint(session.today)?;
    print_sprint(&sprint, json_output)
}

pub fn history(session: &Session, count: Option<usize>, json_output: bool) -> Result<()> {
    let count = count.unwrap_or(session.settings.history_count);
    let sprints = session.calendar.sprint_history(count, session.today)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&sprints)?);
        return Ok(());
    }

    println!("Sprint history (last {})", sprints.len());
    println!("────────────────────────────────");
    for sprint in &sprints {
        let marker = if sprint.is_current { "▸" } else { " " };
        let name = format!("{:<10}", sprint.display_name);
        let name = if sprint.is_current {
            name.bold().to_string()
        } else {
            name
        };
        println!(
            "{marker} {name} {}  {}",
            sprint.year,
            sprint.formatted_range
        );
    }
    Ok(())
}

pub fn weeks(sprint: i64, json_output: bool) -> Result<()> {
    let sprint = parse_sprint(sprint)?;
    let weeks = sprint_weeks(sprint);

    if json_output {
        let out = json!({ "sprint": sprint, "weeks": weeks });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Sprint {sprint}: weeks {} and {}", weeks.start, weeks.end);
    if weeks.end_year_offset > 0 {
        println!("  week {} falls in the next ISO year", weeks.end);
    }
    Ok(())
}

pub fn range(session: &Session, sprint: i64, json_output: bool) -> Result<()> {
    let sprint = parse_sprint(sprint)?;
    let range = session.calendar.sprint_date_range(sprint, session.today)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&range)?);
        return Ok(());
    }

    println!(
        "Sprint {sprint}: {} → {}",
        range.start_formatted, range.end_formatted
    );
    Ok(())
}

pub fn week(session: &Session, date: Option<&str>, json_output: bool) -> Result<()> {
    let date = match date {
        Some(value) => parse_date(value)?,
        None => session.today,
    };
    let week = week_number(date);
    let year = iso_year(date);
    let sprint = sprint_from_week(week);

    if json_output {
        let out = json!({
            "date": date,
            "weekNumber": week,
            "isoYear": year,
            "sprint": sprint,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{date}: ISO week {week} of {year} → Sprint {sprint}");
    Ok(())
}

pub fn config(
    store: &SettingsStore,
    command: ConfigCmd,
    locale: Option<&str>,
    json_output: bool,
) -> Result<()> {
    match command {
        ConfigCmd::Show => config_show(store, locale, json_output),
        ConfigCmd::Init => config_init(store, json_output),
    }
}

fn config_show(store: &SettingsStore, locale: Option<&str>, json_output: bool) -> Result<()> {
    let (mut settings, origin) = store.load()?;
    if let Some(locale) = locale {
        parse_locale(locale)?;
        settings.locale = locale.to_string();
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let path = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config directory)".into());
    let origin = match origin {
        SettingsOrigin::File => "file",
        SettingsOrigin::Defaults => "defaults",
    };
    println!("config:        {path} ({origin})");
    println!("locale:        {}", settings.locale);
    println!("history count: {}", settings.history_count);
    Ok(())
}

fn config_init(store: &SettingsStore, json_output: bool) -> Result<()> {
    let settings = store.init()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else if let Some(path) = store.path() {
        println!("Wrote default settings to {}", path.display());
    }
    Ok(())
}

pub fn version() -> Result<()> {
    println!("sprintcal {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

pub fn default_action() -> Result<()> {
    println!("sprintcal — two-week sprints on the ISO week calendar.");
    println!();
    println!("Run `sprintcal --help` for usage or `sprintcal current` to get started.");
    Ok(())
}

fn print_sprint(sprint: &SprintRecord, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(sprint)?);
        return Ok(());
    }

    let current = if sprint.is_current { " (current)" } else { "" };
    println!("{} · {}{current}", sprint.display_name.bold(), sprint.year);
    println!("  {}", sprint.formatted_range);
    let mut weeks = format!("  weeks {} and {}", sprint.weeks.start, sprint.weeks.end);
    if let Some(position) = sprint.position {
        weeks.push_str(&format!(" · week {} of 2", position.week_in_sprint));
    }
    println!("{weeks}");
    Ok(())
}
