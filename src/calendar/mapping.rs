//! Week ↔ sprint arithmetic.
//!
//! Sprint N covers ISO weeks 2N and 2N+1. Week 1 has no even partner and is
//! folded into sprint 1. A year is treated as 26 sprints of 52 weeks.

use serde::{Deserialize, Serialize};

use super::{IsoYear, WeekNumber};

/// Sprint index within an ISO year, starting at 1.
pub type SprintNumber = u32;

pub const SPRINTS_PER_YEAR: u32 = 26;
pub const WEEKS_PER_YEAR: u32 = 52;

/// The two ISO weeks making up a sprint.
///
/// `end_year_offset` is 1 when the second week wrapped past week 52 into the
/// following ISO year, 0 otherwise. The week numbers themselves never carry
/// the year, so callers resolving dates must add the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintWeeks {
    pub start: WeekNumber,
    pub end: WeekNumber,
    pub end_year_offset: i32,
}

impl SprintWeeks {
    pub fn as_pair(&self) -> (WeekNumber, WeekNumber) {
        (self.start, self.end)
    }

    pub fn contains(&self, week: WeekNumber) -> bool {
        week == self.start || week == self.end
    }

    /// ISO year of the end week for a sprint of `year`.
    pub fn end_year(&self, year: IsoYear) -> IsoYear {
        year + self.end_year_offset
    }
}

/// Sprint containing ISO week `week`.
///
/// Week 0 is not a real week and maps to sprint 0; callers must not rely on it.
pub fn sprint_from_week(week: WeekNumber) -> SprintNumber {
    if week == 1 { 1 } else { week / 2 }
}

/// The two weeks of `sprint`.
///
/// Sprint 26 ends in week 1 of the next ISO year. Sprint 0 yields weeks
/// (0, 1) and is meaningless, as is anything past 26; arithmetic saturates.
pub fn sprint_weeks(sprint: SprintNumber) -> SprintWeeks {
    let start = sprint.saturating_mul(2);
    let mut end = start.saturating_add(1);
    let mut end_year_offset = 0;
    if end > WEEKS_PER_YEAR {
        end -= WEEKS_PER_YEAR;
        end_year_offset = 1;
    }
    SprintWeeks {
        start,
        end,
        end_year_offset,
    }
}

/// Moves `delta` sprints away from `(year, sprint)`, rolling over year
/// boundaries at 26 sprints per year.
///
/// Sprint 1 of 2026 minus one is sprint 26 of 2025; sprint 26 plus one is
/// sprint 1 of the next year.
pub fn offset_sprint(year: IsoYear, sprint: SprintNumber, delta: i64) -> (IsoYear, SprintNumber) {
    let per_year = i64::from(SPRINTS_PER_YEAR);
    let zero_based = i64::from(sprint) - 1 + delta;
    let years = zero_based.div_euclid(per_year);
    let number = zero_based.rem_euclid(per_year) + 1;
    let year = i64::from(year) + years;
    (
        year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as IsoYear,
        number as SprintNumber,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn week_one_belongs_to_sprint_one() {
        assert_eq!(sprint_from_week(1), 1);
        assert_eq!(sprint_from_week(2), 1);
        assert_eq!(sprint_from_week(3), 1);
    }

    #[test]
    fn even_week_starts_a_sprint() {
        assert_eq!(sprint_from_week(4), 2);
        assert_eq!(sprint_from_week(5), 2);
        assert_eq!(sprint_from_week(10), 5);
        assert_eq!(sprint_from_week(11), 5);
        assert_eq!(sprint_from_week(52), 26);
        assert_eq!(sprint_from_week(53), 26);
    }

    #[test]
    fn week_zero_maps_to_sprint_zero() {
        assert_eq!(sprint_from_week(0), 0);
    }

    #[test]
    fn sprint_weeks_plain() {
        assert_eq!(sprint_weeks(1).as_pair(), (2, 3));
        assert_eq!(sprint_weeks(5).as_pair(), (10, 11));
        assert_eq!(sprint_weeks(25).as_pair(), (50, 51));
        assert_eq!(sprint_weeks(25).end_year_offset, 0);
    }

    #[test]
    fn sprint_26_wraps_into_next_year() {
        let weeks = sprint_weeks(26);
        assert_eq!(weeks.as_pair(), (52, 1));
        assert_eq!(weeks.end_year_offset, 1);
        assert_eq!(weeks.end_year(2025), 2026);
    }

    #[test]
    fn sprint_zero_is_meaningless_but_defined() {
        let weeks = sprint_weeks(0);
        assert_eq!(weeks.as_pair(), (0, 1));
        assert_eq!(weeks.end_year_offset, 0);
    }

    #[test]
    fn huge_sprint_saturates() {
        let weeks = sprint_weeks(3_000_000_000);
        assert_eq!(weeks.start, u32::MAX);
        assert_eq!(weeks.end_year_offset, 1);
        assert_eq!(sprint_weeks(u32::MAX).start, u32::MAX);
    }

    #[test]
    fn contains_checks_both_weeks() {
        let weeks = sprint_weeks(26);
        assert!(weeks.contains(52));
        assert!(weeks.contains(1));
        assert!(!weeks.contains(53));
    }

    #[test]
    fn offset_within_year() {
        assert_eq!(offset_sprint(2025, 10, -1), (2025, 9));
        assert_eq!(offset_sprint(2025, 10, 0), (2025, 10));
        assert_eq!(offset_sprint(2025, 10, 3), (2025, 13));
    }

    #[test]
    fn offset_rolls_back_one_year() {
        assert_eq!(offset_sprint(2026, 1, -1), (2025, 26));
        assert_eq!(offset_sprint(2026, 3, -5), (2025, 24));
        assert_eq!(offset_sprint(2026, 1, -26), (2025, 1));
    }

    #[test]
    fn offset_rolls_back_several_years() {
        assert_eq!(offset_sprint(2026, 1, -27), (2024, 26));
        assert_eq!(offset_sprint(2026, 2, -54), (2023, 26));
    }

    #[test]
    fn offset_rolls_forward() {
        assert_eq!(offset_sprint(2025, 26, 1), (2026, 1));
        assert_eq!(offset_sprint(2025, 20, 40), (2027, 8));
    }

    proptest! {
        #[test]
        fn sprint_weeks_round_trip(sprint in 1u32..=26) {
            prop_assert_eq!(sprint_from_week(sprint_weeks(sprint).start), sprint);
        }

        #[test]
        fn both_weeks_of_a_sprint_agree(k in 1u32..=26) {
            prop_assert_eq!(sprint_from_week(2 * k), k);
            prop_assert_eq!(sprint_from_week(2 * k + 1), k);
        }

        #[test]
        fn sprint_from_week_is_monotonic(week in 1u32..53) {
            prop_assert!(sprint_from_week(week) <= sprint_from_week(week + 1));
        }

        #[test]
        fn offset_by_one_is_a_single_step(year in 1900i32..2200, sprint in 1u32..=26) {
            let (prev_year, prev) = offset_sprint(year, sprint, -1);
            if sprint == 1 {
                prop_assert_eq!((prev_year, prev), (year - 1, SPRINTS_PER_YEAR));
            } else {
                prop_assert_eq!((prev_year, prev), (year, sprint - 1));
            }
            prop_assert_eq!(offset_sprint(prev_year, prev, 1), (year, sprint));
        }
    }
}
