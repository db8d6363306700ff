//! Sprint discovery and weekly → sprint aggregation over caller data.
//!
//! Input collections are treated as possibly dirty: records whose week tag
//! cannot be placed on the sprint calendar are skipped, never errors. The
//! `_strict` variants report what was skipped.

pub mod decode;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::IsoYear;
use crate::calendar::WeekNumber;
use crate::calendar::mapping::{SprintNumber, sprint_from_week, sprint_weeks};
use crate::error::Result;
use crate::model::SprintRecord;
use crate::resolver::SprintCalendar;

/// ISO week a weekly record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTag {
    pub week_number: WeekNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<IsoYear>,
}

impl WeekTag {
    pub fn new(week_number: WeekNumber, year: IsoYear) -> Self {
        Self {
            week_number,
            year: Some(year),
        }
    }
}

/// A caller-supplied weekly bucket: a week tag plus an opaque payload.
///
/// In JSON the payload fields sit next to `week`:
/// `{"week": {"weekNumber": 10, "year": 2025}, "points": 8}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord<T> {
    pub week: WeekTag,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> WeeklyRecord<T> {
    pub fn new(week: WeekTag, payload: T) -> Self {
        Self { week, payload }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum SkipReason {
    #[error("entry is not an object with a `week` field")]
    MissingWeek,
    #[error("malformed week tag: {0}")]
    MalformedWeek(String),
    #[error("week number {0} is outside 1..=53")]
    WeekOutOfRange(WeekNumber),
    #[error("week tag has no year")]
    MissingYear,
    #[error("year {0} cannot be represented")]
    YearOutOfRange(IsoYear),
}

/// A record left out of a best-effort pass, by its index in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: SkipReason,
}

impl SkippedRecord {
    pub(crate) fn new(index: usize, reason: SkipReason) -> Self {
        tracing::debug!(index, %reason, "skipping weekly record");
        Self { index, reason }
    }
}

/// Sprints found in the data, plus whatever was skipped on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub sprints: Vec<SprintRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// One sprint's reducer output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintAggregate<R> {
    pub sprint: SprintNumber,
    pub data: R,
}

fn placeable_week(tag: &WeekTag) -> std::result::Result<(WeekNumber, IsoYear), SkipReason> {
    if !(1..=53).contains(&tag.week_number) {
        return Err(SkipReason::WeekOutOfRange(tag.week_number));
    }
    let year = tag.year.ok_or(SkipReason::MissingYear)?;
    Ok((tag.week_number, year))
}

/// Distinct sprints present in `records`, newest first, with diagnostics
/// for every record that could not be placed.
pub fn extract_sprints_strict<T>(calendar: &SprintCalendar, records: &[WeeklyRecord<T>]) -> Extraction {
    let mut found: BTreeMap<(IsoYear, SprintNumber), SprintRecord> = BTreeMap::new();
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let (week, year) = match placeable_week(&record.week) {
            Ok(placed) => placed,
            Err(reason) => {
                skipped.push(SkippedRecord::new(index, reason));
                continue;
            }
        };
        let key = (year, sprint_from_week(week));
        if found.contains_key(&key) {
            continue;
        }
        match calendar.sprint(key.0, key.1) {
            Ok(sprint) => {
                found.insert(key, sprint);
            }
            Err(_) => skipped.push(SkippedRecord::new(index, SkipReason::YearOutOfRange(year))),
        }
    }

    Extraction {
        sprints: found.into_values().rev().collect(),
        skipped,
    }
}

/// Distinct sprints present in `records`, sorted by year then sprint number,
/// newest first. Unplaceable records are ignored.
pub fn extract_sprints<T>(calendar: &SprintCalendar, records: &[WeeklyRecord<T>]) -> Vec<SprintRecord> {
    extract_sprints_strict(calendar, records).sprints
}

/// Sprints from the data, cut to `min_count`; when the data holds none,
/// the last `min_count` calendar sprints ending at `today` instead.
pub fn sprint_history_from_data<T>(
    calendar: &SprintCalendar,
    records: &[WeeklyRecord<T>],
    min_count: usize,
    today: NaiveDate,
) -> Result<Vec<SprintRecord>> {
    let mut sprints = extract_sprints(calendar, records);
    if sprints.is_empty() {
        return calendar.sprint_history(min_count, today);
    }
    sprints.truncate(min_count);
    Ok(sprints)
}

fn belongs_to_sprint<T>(record: &WeeklyRecord<T>, sprint: SprintNumber, year: Option<IsoYear>) -> bool {
    let weeks = sprint_weeks(sprint);
    let expected_year = if record.week.week_number == weeks.start {
        year
    } else if record.week.week_number == weeks.end {
        year.map(|y| weeks.end_year(y))
    } else {
        return false;
    };
    match (expected_year, record.week.year) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => true,
    }
}

/// Applies `reducer` to the records of `sprint`'s two weeks.
///
/// With a `year`, records carrying a different year are left out; records
/// without a year still count. The wrapped end week of sprint 26 is matched
/// against the following year. Returns `None` when nothing matches.
pub fn aggregate_weekly_to_sprint<T, R, F>(
    records: &[WeeklyRecord<T>],
    sprint: SprintNumber,
    reducer: F,
    year: Option<IsoYear>,
) -> Option<R>
where
    F: FnOnce(&[&WeeklyRecord<T>]) -> R,
{
    let matching: Vec<&WeeklyRecord<T>> = records
        .iter()
        .filter(|record| belongs_to_sprint(record, sprint, year))
        .collect();
    if matching.is_empty() {
        return None;
    }
    Some(reducer(&matching))
}

/// [`aggregate_weekly_to_sprint`] for each of `sprints`, in the given order,
/// dropping sprints with no records.
pub fn aggregate_multiple_sprints<T, R, F>(
    records: &[WeeklyRecord<T>],
    sprints: &[SprintNumber],
    reducer: F,
) -> Vec<SprintAggregate<R>>
where
    F: Fn(&[&WeeklyRecord<T>]) -> R,
{
    sprints
        .iter()
        .filter_map(|&sprint| {
            aggregate_weekly_to_sprint(records, sprint, &reducer, None)
                .map(|data| SprintAggregate { sprint, data })
        })
        .collect()
}
