use chrono::{Local, NaiveDate};

/// Returns the effective "today" given an optional override.
///
/// The only place the system clock is read; library queries always take the
/// reference date as an argument, and binaries resolve it here once.
pub fn effective_today(override_today: Option<NaiveDate>) -> NaiveDate {
    override_today.unwrap_or_else(|| Local::now().date_naive())
}
