//! Display formatting for sprint date ranges.
//!
//! Day numbers are never padded. Month names follow the configured locale;
//! the day / month / year ordering is fixed.

use chrono::{Datelike, Locale, NaiveDate, TimeZone, Utc};

use crate::error::{Result, SprintError};

pub const DEFAULT_LOCALE: Locale = Locale::fr_FR;

/// Parses a locale identifier such as `fr_FR`, `fr-FR` or `fr`.
///
/// A bare language code expands to its usual territory (`fr` → `fr_FR`,
/// `en` → `en_US`).
pub fn parse_locale(id: &str) -> Result<Locale> {
    let trimmed = id.trim();
    let normalized = trimmed.replace('-', "_");
    let candidate = match normalized.as_str() {
        "" => return Err(SprintError::UnknownLocale(id.into())),
        "en" => "en_US".to_string(),
        lang if !lang.contains('_') => format!("{lang}_{}", lang.to_uppercase()),
        full => full.to_string(),
    };
    Locale::try_from(candidate.as_str()).map_err(|_| SprintError::UnknownLocale(id.into()))
}

/// Long-form month name of `date` in `locale`.
pub fn month_name(date: NaiveDate, locale: Locale) -> String {
    match date.and_hms_opt(0, 0, 0) {
        Some(midnight) => Utc
            .from_utc_datetime(&midnight)
            .format_localized("%B", locale)
            .to_string(),
        None => date.format("%B").to_string(),
    }
}

/// `6 janvier`
pub fn format_day_month(date: NaiveDate, locale: Locale) -> String {
    format!("{} {}", date.day(), month_name(date, locale))
}

/// `19 janvier 2026`
pub fn format_day_month_year(date: NaiveDate, locale: Locale) -> String {
    format!("{} {}", format_day_month(date, locale), date.year())
}

/// Formats `start..=end` as compactly as the two dates allow:
///
/// - same month and year: `6 - 19 janvier 2026`
/// - same year: `26 janvier - 8 février 2026`
/// - different years: `22 décembre 2025 - 4 janvier 2026`
pub fn format_range(start: NaiveDate, end: NaiveDate, locale: Locale) -> String {
    if start.year() != end.year() {
        format!(
            "{} - {}",
            format_day_month_year(start, locale),
            format_day_month_year(end, locale)
        )
    } else if start.month() != end.month() {
        format!(
            "{} - {}",
            format_day_month(start, locale),
            format_day_month_year(end, locale)
        )
    } else {
        format!("{} - {}", start.day(), format_day_month_year(end, locale))
    }
}
