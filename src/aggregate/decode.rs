//! Best-effort decoding of untyped JSON into weekly records.

use serde_json::{Map, Value};

use super::{SkipReason, SkippedRecord, WeeklyRecord};

/// Payload type for records decoded from arbitrary JSON objects.
pub type JsonPayload = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    pub records: Vec<WeeklyRecord<JsonPayload>>,
    /// Input index of each entry in `records`.
    pub positions: Vec<usize>,
    pub skipped: Vec<SkippedRecord>,
}

impl Decoded {
    /// Rewrites diagnostics indexed by `records` to input indices.
    pub fn to_input_indices(&self, skipped: &mut [SkippedRecord]) {
        for entry in skipped {
            if let Some(&position) = self.positions.get(entry.index) {
                entry.index = position;
            }
        }
    }
}

/// Decodes `value` as a list of weekly records.
///
/// Anything other than an array is "no data" and decodes to nothing. Array
/// entries without a usable `week` object are skipped and reported.
pub fn decode_weekly_records(value: &Value) -> Decoded {
    let Some(entries) = value.as_array() else {
        return Decoded::default();
    };

    let mut decoded = Decoded::default();
    for (index, entry) in entries.iter().enumerate() {
        let has_week = entry
            .as_object()
            .and_then(|object| object.get("week"))
            .is_some_and(|week| !week.is_null());
        if !has_week {
            decoded.skipped.push(SkippedRecord::new(index, SkipReason::MissingWeek));
            continue;
        }
        match serde_json::from_value::<WeeklyRecord<JsonPayload>>(entry.clone()) {
            Ok(record) => {
                decoded.records.push(record);
                decoded.positions.push(index);
            }
            Err(e) => decoded
                .skipped
                .push(SkippedRecord::new(index, SkipReason::MalformedWeek(e.to_string()))),
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::WeekTag;
    use serde_json::json;

    #[test]
    fn decodes_well_formed_entries() {
        let value = json!([
            {"week": {"weekNumber": 10, "year": 2025}, "points": 3},
            {"week": {"weekNumber": 11}, "points": 4}
        ]);
        let decoded = decode_weekly_records(&value);
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].week, WeekTag::new(10, 2025));
        assert_eq!(decoded.records[1].week.year, None);
        assert_eq!(decoded.records[1].payload["points"], 4);
    }

    #[test]
    fn non_array_is_no_data() {
        for value in [json!(null), json!({"week": {"weekNumber": 1}}), json!("weeks"), json!(3)] {
            assert_eq!(decode_weekly_records(&value), Decoded::default());
        }
    }

    #[test]
    fn skips_entries_without_week() {
        let value = json!([
            {"points": 3},
            42,
            {"week": null},
            {"week": {"weekNumber": 2, "year": 2025}}
        ]);
        let decoded = decode_weekly_records(&value);
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.positions, vec![3]);
        let indices: Vec<usize> = decoded.skipped.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(decoded.skipped.iter().all(|s| s.reason == SkipReason::MissingWeek));
    }

    #[test]
    fn maps_diagnostics_back_to_input() {
        let value = json!([
            {"points": 3},
            {"week": {"weekNumber": 4, "year": 2025}},
            {"week": {"weekNumber": 60, "year": 2025}}
        ]);
        let decoded = decode_weekly_records(&value);
        let mut skipped = vec![SkippedRecord {
            index: 1,
            reason: SkipReason::WeekOutOfRange(60),
        }];
        decoded.to_input_indices(&mut skipped);
        assert_eq!(skipped[0].index, 2);
    }

    #[test]
    fn skips_malformed_week() {
        let value = json!([
            {"week": {"year": 2025}},
            {"week": {"weekNumber": "ten", "year": 2025}},
            {"week": {"weekNumber": -3, "year": 2025}}
        ]);
        let decoded = decode_weekly_records(&value);
        assert!(decoded.records.is_empty());
        assert_eq!(decoded.skipped.len(), 3);
        assert!(
            decoded
                .skipped
                .iter()
                .all(|s| matches!(s.reason, SkipReason::MalformedWeek(_)))
        );
    }
}
