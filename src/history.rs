//! Consecutive past sprints ending at the current one.

use chrono::NaiveDate;

use crate::calendar::mapping::offset_sprint;
use crate::error::Result;
use crate::model::SprintRecord;
use crate::resolver::SprintCalendar;

impl SprintCalendar {
    /// `count` sprints, most recent first, starting with the sprint that
    /// contains `today`.
    ///
    /// Walking back past sprint 1 continues at sprint 26 of the previous ISO
    /// year, as many years back as needed. Only entry 0 is flagged current.
    pub fn sprint_history(&self, count: usize, today: NaiveDate) -> Result<Vec<SprintRecord>> {
        let mut history = Vec::with_capacity(count.min(1024));
        if count == 0 {
            return Ok(history);
        }

        let current = self.current_sprint(today)?;
        let (year, number) = current.key();
        // fail before walking when the oldest entry has no representable dates
        let depth = i64::try_from(count - 1).unwrap_or(i64::MAX);
        let (oldest_year, oldest) = offset_sprint(year, number, -depth);
        self.sprint_bounds(oldest_year, oldest)?;
        history.push(current);

        for step in 1..count {
            let (past_year, past_number) = offset_sprint(year, number, -(step as i64));
            if past_year != year && past_number == 26 {
                tracing::debug!(from = year, to = past_year, "sprint history rolled into previous year");
            }
            history.push(self.sprint(past_year, past_number)?);
        }

        Ok(history)
    }
}
