//! ISO-8601 calendar primitives.
//!
//! An ISO week runs Monday to Sunday and belongs to the year that holds its
//! Thursday. Week 1 is the week containing 4 January, so the first days of
//! January can sit in week 52/53 of the previous year and the last days of
//! December in week 1 of the next one.

pub mod format;
pub mod mapping;

use chrono::{Datelike, Days, NaiveDate};

/// ISO week-of-year, 1..=53.
pub type WeekNumber = u32;

/// Year an ISO week belongs to. May differ from the calendar year near 1 January.
pub type IsoYear = i32;

fn thursday_of_week(date: NaiveDate) -> NaiveDate {
    let from_monday = date.weekday().num_days_from_monday();
    if from_monday <= 3 {
        date.checked_add_days(Days::new(u64::from(3 - from_monday)))
            .unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new(u64::from(from_monday - 3)))
            .unwrap_or(date)
    }
}

fn monday_of_week(date: NaiveDate) -> NaiveDate {
    let from_monday = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(from_monday)).unwrap_or(date)
}

/// ISO week number of `date`.
///
/// Shifts to the Thursday of the date's week, then counts whole weeks since
/// 1 January of that Thursday's year.
pub fn week_number(date: NaiveDate) -> WeekNumber {
    thursday_of_week(date).ordinal0() / 7 + 1
}

/// ISO year of `date`: the calendar year of its week's Thursday.
pub fn iso_year(date: NaiveDate) -> IsoYear {
    thursday_of_week(date).year()
}

/// Monday of ISO week `week` in `year`.
///
/// Anchored on 4 January, which is always in week 1. Week numbers past the
/// end of the year simply run on into the next one. Returns `None` only when
/// the year is outside the representable date range.
pub fn date_from_week(week: WeekNumber, year: IsoYear) -> Option<NaiveDate> {
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4)?;
    let week1_monday = monday_of_week(jan4);
    if week == 0 {
        return week1_monday.checked_sub_days(Days::new(7));
    }
    week1_monday.checked_add_days(Days::new(u64::from(week - 1) * 7))
}
