use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use sprintcal::aggregate::decode::JsonPayload;
use sprintcal::model::display_name;
use sprintcal::{
    IsoYear, SkippedRecord, SprintCalendar, SprintNumber, SprintRecord, WeeklyRecord,
    aggregate_multiple_sprints, aggregate_weekly_to_sprint, extract_sprints_strict,
    sprint_from_week, sprint_history_from_data,
};

use crate::error::Result;

pub type JsonRecord = WeeklyRecord<JsonPayload>;

/// Numeric value of `field` in a record's payload; missing or non-numeric
/// values count as zero.
pub fn field_value(record: &JsonRecord, field: &str) -> f64 {
    record
        .payload
        .get(field)
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Tally {
    pub total: f64,
    pub records: usize,
}

/// Reducer summing `field` over a sprint's weekly records.
pub fn tally_field(field: &str) -> impl Fn(&[&JsonRecord]) -> Tally + '_ {
    move |records: &[&JsonRecord]| Tally {
        total: records.iter().map(|r| field_value(r, field)).sum(),
        records: records.len(),
    }
}

// ─── Sprints ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintRow {
    #[serde(flatten)]
    pub sprint: SprintRecord,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintsReport {
    pub from_data: bool,
    pub sprints: Vec<SprintRow>,
    pub skipped: Vec<SkippedRecord>,
}

/// Records placed on `sprint` by extraction: same ISO year, same
/// `sprint_from_week`. Unlike the two-week aggregator this keeps week 1 in
/// sprint 1 and week 53 in sprint 26.
fn records_in_sprint<'a>(records: &'a [JsonRecord], sprint: &SprintRecord) -> Vec<&'a JsonRecord> {
    records
        .iter()
        .filter(|r| {
            r.week.year == Some(sprint.year) && sprint_from_week(r.week.week_number) == sprint.number
        })
        .collect()
}

pub fn calculate_sprints(
    calendar: &SprintCalendar,
    records: &[JsonRecord],
    min_count: usize,
    today: NaiveDate,
) -> Result<SprintsReport> {
    let extraction = extract_sprints_strict(calendar, records);
    let sprints = sprint_history_from_data(calendar, records, min_count, today)?;

    let sprints = sprints
        .into_iter()
        .map(|sprint| SprintRow {
            records: records_in_sprint(records, &sprint).len(),
            sprint,
        })
        .collect();

    Ok(SprintsReport {
        from_data: !extraction.sprints.is_empty(),
        sprints,
        skipped: extraction.skipped,
    })
}

pub fn render_sprints_text(report: &SprintsReport) -> String {
    let mut out = String::new();
    if report.from_data {
        out.push_str(&format!("Sprints in data ({})\n", report.sprints.len()));
    } else {
        out.push_str(&format!(
            "No sprints in data; last {} calendar sprints\n",
            report.sprints.len()
        ));
    }
    out.push_str("────────────────────────────────\n");

    for row in &report.sprints {
        let marker = if row.sprint.is_current { "▸" } else { " " };
        out.push_str(&format!(
            "{marker} {:<10} {}  {:<32} {:>3} records\n",
            row.sprint.display_name, row.sprint.year, row.sprint.formatted_range, row.records
        ));
    }

    if !report.skipped.is_empty() {
        out.push_str(&format!("\nSkipped: {} record(s)\n", report.skipped.len()));
    }
    out
}

// ─── Velocity ────────────────────────────────────────────────

/// Which sprints a velocity report covers.
#[derive(Debug, Clone, PartialEq)]
pub enum SprintSelection {
    /// Every sprint found in the data, each matched against its own year.
    FromData,
    /// The listed sprints, in order, optionally restricted to one year.
    Numbers {
        sprints: Vec<SprintNumber>,
        year: Option<IsoYear>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintBucket {
    pub sprint: SprintNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<IsoYear>,
    pub label: String,
    pub total: f64,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityReport {
    pub field: String,
    pub sprints: Vec<SprintBucket>,
    pub average: f64,
    pub trend: Trend,
    pub skipped: Vec<SkippedRecord>,
}

fn bucket(sprint: SprintNumber, year: Option<IsoYear>, tally: Tally) -> SprintBucket {
    let label = match year {
        Some(year) => format!("{} · {year}", display_name(sprint)),
        None => display_name(sprint),
    };
    SprintBucket {
        sprint,
        year,
        label,
        total: tally.total,
        records: tally.records,
    }
}

/// Compares the first half of `buckets` with the second, oldest first.
fn trend(buckets: &[SprintBucket]) -> Trend {
    if buckets.len() < 2 {
        return Trend::Stable;
    }
    let half = buckets.len() / 2;
    let first_half: f64 = buckets[..half].iter().map(|b| b.total).sum();
    let second_half: f64 = buckets[half..].iter().map(|b| b.total).sum();
    if second_half > first_half + 1.0 {
        Trend::Improving
    } else if first_half > second_half + 1.0 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

pub fn calculate_velocity(
    calendar: &SprintCalendar,
    records: &[JsonRecord],
    field: &str,
    selection: &SprintSelection,
) -> VelocityReport {
    let reducer = tally_field(field);
    let mut skipped = Vec::new();

    let sprints: Vec<SprintBucket> = match selection {
        SprintSelection::FromData => {
            let extraction = extract_sprints_strict(calendar, records);
            skipped = extraction.skipped;
            extraction
                .sprints
                .iter()
                .rev()
                .map(|s| {
                    let tally = reducer(records_in_sprint(records, s).as_slice());
                    bucket(s.number, Some(s.year), tally)
                })
                .collect()
        }
        SprintSelection::Numbers {
            sprints,
            year: None,
        } => aggregate_multiple_sprints(records, sprints, &reducer)
            .into_iter()
            .map(|agg| bucket(agg.sprint, None, agg.data))
            .collect(),
        SprintSelection::Numbers {
            sprints,
            year: Some(year),
        } => sprints
            .iter()
            .filter_map(|&sprint| {
                aggregate_weekly_to_sprint(records, sprint, &reducer, Some(*year))
                    .map(|tally| bucket(sprint, Some(*year), tally))
            })
            .collect(),
    };

    let total: f64 = sprints.iter().map(|b| b.total).sum();
    let average = if sprints.is_empty() {
        0.0
    } else {
        total / sprints.len() as f64
    };

    VelocityReport {
        field: field.to_string(),
        trend: trend(&sprints),
        sprints,
        average,
        skipped,
    }
}

pub fn render_velocity_text(report: &VelocityReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Velocity of `{}` ({} sprints)\n",
        report.field,
        report.sprints.len()
    ));
    out.push_str("────────────────────────────────\n");

    let max_total = report
        .sprints
        .iter()
        .map(|b| b.total)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    for sprint in &report.sprints {
        let bar_len = (sprint.total.max(0.0) * 20.0 / max_total).round() as usize;
        let bar: String = "█".repeat(bar_len);
        out.push_str(&format!(
            "  {:<18} {:>7.1}  {}\n",
            sprint.label, sprint.total, bar
        ));
    }

    out.push_str(&format!(
        "\nAverage: {:.1} {}/sprint\n",
        report.average, report.field
    ));
    let trend_arrow = match report.trend {
        Trend::Improving => "↑ improving",
        Trend::Declining => "↓ declining",
        Trend::Stable => "→ stable",
    };
    out.push_str(&format!("Trend: {trend_arrow}\n"));
    out
}
