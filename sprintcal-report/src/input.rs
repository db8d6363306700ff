use std::fs;
use std::path::Path;

use serde_json::Value;
use sprintcal::aggregate::decode::{Decoded, decode_weekly_records};

use crate::error::{ReportError, Result};

/// Reads a JSON file of weekly records.
///
/// The file must be valid JSON; its entries are decoded best-effort, so a
/// top-level value that is not an array simply holds no records.
pub fn load_weekly_records(path: &Path) -> Result<Decoded> {
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.display().to_string()));
    }
    let data = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&data)?;
    let decoded = decode_weekly_records(&value);
    tracing::debug!(
        path = %path.display(),
        records = decoded.records.len(),
        skipped = decoded.skipped.len(),
        "loaded weekly records"
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = load_weekly_records(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ReportError::FileNotFound(_)));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weeks.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(matches!(
            load_weekly_records(&path),
            Err(ReportError::Json(_))
        ));
    }

    #[test]
    fn object_file_holds_no_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weeks.json");
        std::fs::write(&path, r#"{"weeks": []}"#).unwrap();
        let decoded = load_weekly_records(&path).unwrap();
        assert!(decoded.records.is_empty());
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn loads_and_skips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weeks.json");
        std::fs::write(
            &path,
            r#"[{"week": {"weekNumber": 10, "year": 2025}, "points": 5}, {"points": 1}]"#,
        )
        .unwrap();
        let decoded = load_weekly_records(&path).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.skipped.len(), 1);
    }
}
