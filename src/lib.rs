//! Sprint calendar on top of ISO-8601 weeks.
//!
//! A sprint is two ISO weeks, starting on an even week number: sprint N
//! covers weeks 2N and 2N+1, and week 1 is folded into sprint 1. This crate
//! maps dates to sprints and back, walks sprint history across year
//! boundaries, and rolls caller-supplied weekly records up into sprints.
//!
//! ```
//! use chrono::NaiveDate;
//! use sprintcal::SprintCalendar;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
//! let sprint = SprintCalendar::default().current_sprint(today).unwrap();
//! assert_eq!(sprint.number, 5);
//! assert_eq!(sprint.formatted_range, "3 - 16 mars 2025");
//! ```

pub mod aggregate;
pub mod calendar;
pub mod cli;
pub mod clock;
pub mod error;
pub mod history;
pub mod model;
pub mod resolver;
pub mod storage;

pub use aggregate::{
    Extraction, SkipReason, SkippedRecord, SprintAggregate, WeekTag, WeeklyRecord,
    aggregate_multiple_sprints, aggregate_weekly_to_sprint, extract_sprints,
    extract_sprints_strict, sprint_history_from_data,
};
pub use calendar::mapping::{SprintNumber, SprintWeeks, offset_sprint, sprint_from_week, sprint_weeks};
pub use calendar::{IsoYear, WeekNumber, date_from_week, iso_year, week_number};
pub use error::{Result, SprintError};
pub use model::{Settings, SprintDateRange, SprintPosition, SprintRecord};
pub use resolver::SprintCalendar;
