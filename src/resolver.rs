//! Resolves sprint numbers to dates and reference dates to sprints.

use chrono::{Datelike, Days, Locale, NaiveDate};

use crate::calendar::format::{
    DEFAULT_LOCALE, format_day_month, format_day_month_year, format_range,
};
use crate::calendar::mapping::{SprintNumber, offset_sprint, sprint_from_week, sprint_weeks};
use crate::calendar::{IsoYear, date_from_week, iso_year, week_number};
use crate::error::{Result, SprintError};
use crate::model::{SprintDateRange, SprintPosition, SprintRecord, display_name};

/// Entry point for every sprint query.
///
/// Holds only the display locale; all "current" queries take the reference
/// date explicitly so nothing here reads the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintCalendar {
    locale: Locale,
}

impl Default for SprintCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl SprintCalendar {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// First Monday and last Sunday of `sprint` in `year`.
    ///
    /// The end week is resolved in the year it actually falls in, so sprint 26
    /// ends in January of the following year.
    pub fn sprint_bounds(&self, year: IsoYear, sprint: SprintNumber) -> Result<(NaiveDate, NaiveDate)> {
        let weeks = sprint_weeks(sprint);
        let start = date_from_week(weeks.start, year).ok_or(SprintError::DateOutOfRange { year })?;
        let end_year = weeks.end_year(year);
        let end = date_from_week(weeks.end, end_year)
            .and_then(|monday| monday.checked_add_days(Days::new(6)))
            .ok_or(SprintError::DateOutOfRange { year: end_year })?;
        Ok((start, end))
    }

    /// Sprint `sprint` of ISO year `year`, with no reference-week position.
    pub fn sprint(&self, year: IsoYear, sprint: SprintNumber) -> Result<SprintRecord> {
        let (start_date, end_date) = self.sprint_bounds(year, sprint)?;
        tracing::trace!(year, sprint, %start_date, %end_date, "resolved sprint");
        Ok(SprintRecord {
            number: sprint,
            display_name: display_name(sprint),
            weeks: sprint_weeks(sprint),
            start_date,
            end_date,
            year,
            formatted_range: format_range(start_date, end_date, self.locale),
            is_current: false,
            position: None,
        })
    }

    /// The sprint containing `today`.
    ///
    /// A date in ISO week 1 belongs to sprint 1 but lies before its two
    /// nominal weeks; it is reported as neither start nor end week, with
    /// `week_in_sprint` 1.
    pub fn current_sprint(&self, today: NaiveDate) -> Result<SprintRecord> {
        let week = week_number(today);
        let year = iso_year(today);
        let mut record = self.sprint(year, sprint_from_week(week))?;
        let is_start_week = week == record.weeks.start;
        let is_end_week = week == record.weeks.end;
        record.is_current = true;
        record.position = Some(SprintPosition {
            is_start_week,
            is_end_week,
            week_in_sprint: if is_end_week { 2 } else { 1 },
        });
        Ok(record)
    }

    /// The sprint before the one containing `today`.
    ///
    /// Sprint 1 rolls back to sprint 26 of the previous ISO year, the same
    /// way [`SprintCalendar::sprint_history`] does.
    pub fn previous_sprint(&self, today: NaiveDate) -> Result<SprintRecord> {
        let (year, number) = offset_sprint(iso_year(today), sprint_from_week(week_number(today)), -1);
        self.sprint(year, number)
    }

    /// Dates of `sprint` in the calendar year of `today`.
    ///
    /// The start is formatted as day and month, the end as day, month and year.
    pub fn sprint_date_range(&self, sprint: SprintNumber, today: NaiveDate) -> Result<SprintDateRange> {
        let (start_date, end_date) = self.sprint_bounds(today.year(), sprint)?;
        Ok(SprintDateRange {
            start_date,
            end_date,
            start_formatted: format_day_month(start_date, self.locale),
            end_formatted: format_day_month_year(end_date, self.locale),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sprint_five_of_2025() {
        let sprint = SprintCalendar::default().sprint(2025, 5).unwrap();
        assert_eq!(sprint.start_date, date(2025, 3, 3));
        assert_eq!(sprint.end_date, date(2025, 3, 16));
        assert_eq!(sprint.display_name, "Sprint 5");
        assert_eq!(sprint.formatted_range, "3 - 16 mars 2025");
        assert!(!sprint.is_current);
        assert!(sprint.position.is_none());
    }

    #[test]
    fn sprint_26_ends_next_january() {
        let sprint = SprintCalendar::default().sprint(2025, 26).unwrap();
        assert_eq!(sprint.start_date, date(2025, 12, 22));
        // week 1 of 2026 starts Monday 29 December 2025
        assert_eq!(sprint.end_date, date(2026, 1, 4));
        assert_eq!(sprint.duration_days(), 14);
        assert_eq!(sprint.formatted_range, "22 décembre 2025 - 4 janvier 2026");
    }

    #[test]
    fn current_sprint_start_week() {
        // Monday 3 March 2025 is week 10
        let sprint = SprintCalendar::default().current_sprint(date(2025, 3, 3)).unwrap();
        assert_eq!(sprint.number, 5);
        assert_eq!(sprint.year, 2025);
        assert!(sprint.is_current);
        let position = sprint.position.unwrap();
        assert!(position.is_start_week);
        assert!(!position.is_end_week);
        assert_eq!(position.week_in_sprint, 1);
    }

    #[test]
    fn current_sprint_end_week() {
        let sprint = SprintCalendar::default().current_sprint(date(2025, 3, 14)).unwrap();
        assert_eq!(sprint.number, 5);
        let position = sprint.position.unwrap();
        assert!(!position.is_start_week);
        assert!(position.is_end_week);
        assert_eq!(position.week_in_sprint, 2);
    }

    #[test]
    fn current_sprint_in_week_one() {
        // Thursday 1 January 2026 is week 1 of 2026
        let sprint = SprintCalendar::default().current_sprint(date(2026, 1, 1)).unwrap();
        assert_eq!(sprint.number, 1);
        assert_eq!(sprint.year, 2026);
        assert_eq!(sprint.start_date, date(2026, 1, 5));
        let position = sprint.position.unwrap();
        assert!(!position.is_start_week);
        assert!(!position.is_end_week);
        assert_eq!(position.week_in_sprint, 1);
    }

    #[test]
    fn current_sprint_uses_iso_year() {
        // Friday 1 January 2021 is week 53 of 2020
        let sprint = SprintCalendar::default().current_sprint(date(2021, 1, 1)).unwrap();
        assert_eq!(sprint.year, 2020);
        assert_eq!(sprint.number, 26);
    }

    #[test]
    fn previous_sprint_within_year() {
        let sprint = SprintCalendar::default().previous_sprint(date(2025, 3, 5)).unwrap();
        assert_eq!(sprint.number, 4);
        assert_eq!(sprint.year, 2025);
        assert!(!sprint.is_current);
    }

    #[test]
    fn previous_sprint_crosses_year() {
        let sprint = SprintCalendar::default().previous_sprint(date(2026, 1, 7)).unwrap();
        assert_eq!(sprint.number, 26);
        assert_eq!(sprint.year, 2025);
        assert_eq!(sprint.start_date, date(2025, 12, 22));
    }

    #[test]
    fn date_range_uses_calendar_year() {
        let range = SprintCalendar::default()
            .sprint_date_range(1, date(2026, 6, 15))
            .unwrap();
        assert_eq!(range.start_date, date(2026, 1, 5));
        assert_eq!(range.end_date, date(2026, 1, 18));
        assert_eq!(range.start_formatted, "5 janvier");
        assert_eq!(range.end_formatted, "18 janvier 2026");
    }

    #[test]
    fn english_calendar() {
        let calendar = SprintCalendar::new(Locale::en_US);
        let sprint = calendar.sprint(2026, 2).unwrap();
        assert_eq!(sprint.formatted_range, "19 January - 1 February 2026");
    }

    #[test]
    fn out_of_range_year_is_an_error() {
        let err = SprintCalendar::default().sprint(400_000, 1).unwrap_err();
        assert!(matches!(err, SprintError::DateOutOfRange { year: 400_000 }));
    }

    proptest! {
        #[test]
        fn current_sprint_covers_reference_week(days in 0i64..40_000) {
            let today = date(1950, 1, 1) + chrono::Duration::days(days);
            let week = week_number(today);
            // week 1 precedes sprint 1; weeks 52/53 share sprint 26 whose end wraps
            prop_assume!((2..=51).contains(&week));
            let sprint = SprintCalendar::default().current_sprint(today).unwrap();
            prop_assert!(sprint.contains(today));
            prop_assert_eq!(sprint.duration_days(), 14);
        }
    }
}
