use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::IsoYear;
use crate::calendar::mapping::{SprintNumber, SprintWeeks};

/// Where a reference week sits inside its sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintPosition {
    pub is_start_week: bool,
    pub is_end_week: bool,
    pub week_in_sprint: u8,
}

/// A resolved sprint. Built fresh for every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintRecord {
    pub number: SprintNumber,
    pub display_name: String,
    pub weeks: SprintWeeks,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub year: IsoYear,
    pub formatted_range: String,
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<SprintPosition>,
}

impl SprintRecord {
    /// `(year, number)`, the ordering key used for sorting sprints.
    pub fn key(&self) -> (IsoYear, SprintNumber) {
        (self.year, self.number)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

pub fn display_name(number: SprintNumber) -> String {
    format!("Sprint {number}")
}

/// Dates of a sprint in the current calendar year, with display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintDateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_formatted: String,
    pub end_formatted: String,
}
