//! Bulk import row validation.
//!
//! Import files are JSON arrays of objects, one object per row. Each row's identifier column is
//! validated with the same rules as form input: an absent identifier is accepted (the backend
//! allocates one), a well-formed identifier is accepted in its trimmed form, and anything else
//! flags the row. Rows whose identifier repeats an earlier row are flagged too.
//!
//! Validation never stops at the first bad row; the report covers every row so the caller can
//! show them all.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use subs_uuid::{validate_and_sanitize_uuid, Candidate, UuidValidation, ValidatedUuid};

use crate::config::CoreConfig;
use crate::{CoreError, CoreResult};

/// One import row: column name to raw value.
pub type ImportRow = Map<String, Value>;

/// Outcome for a single row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    /// 1-based row number within the import.
    pub row: usize,
    /// The sanitised identifier, when one was supplied and valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub status: RowStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RowStatus {
    Accepted,
    Flagged { error: String },
}

impl RowOutcome {
    pub fn is_flagged(&self) -> bool {
        matches!(self.status, RowStatus::Flagged { .. })
    }
}

/// Result of validating a whole import.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub flagged: usize,
    pub rows: Vec<RowOutcome>,
}

impl ImportReport {
    pub fn has_flagged_rows(&self) -> bool {
        self.flagged > 0
    }

    /// Iterates over the flagged rows only.
    pub fn flagged_rows(&self) -> impl Iterator<Item = &RowOutcome> {
        self.rows.iter().filter(|row| row.is_flagged())
    }
}

/// Validates import rows against a [`CoreConfig`].
#[derive(Clone, Debug)]
pub struct ImportValidator {
    id_field: String,
    max_rows: usize,
}

impl ImportValidator {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            id_field: cfg.id_field().to_string(),
            max_rows: cfg.max_import_rows(),
        }
    }

    /// Validates every row and returns a report.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TooManyRows`] if `rows` exceeds the configured limit. No row is
    /// validated in that case.
    pub fn validate_rows(&self, rows: &[ImportRow]) -> CoreResult<ImportReport> {
        if rows.len() > self.max_rows {
            return Err(CoreError::TooManyRows {
                limit: self.max_rows,
                actual: rows.len(),
            });
        }

        let mut report = ImportReport::default();
        // Keyed by the parsed value so case variants of one identifier collide.
        let mut seen: HashMap<ValidatedUuid, usize> = HashMap::new();

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            let candidate = row
                .get(&self.id_field)
                .map_or(Candidate::Absent, Candidate::from);

            let outcome = match validate_and_sanitize_uuid(candidate) {
                UuidValidation::Absent => RowOutcome {
                    row: row_number,
                    id: None,
                    status: RowStatus::Accepted,
                },
                UuidValidation::Valid(text) => self.check_duplicate(&mut seen, row_number, text),
                UuidValidation::Invalid(error) => RowOutcome {
                    row: row_number,
                    id: None,
                    status: RowStatus::Flagged { error },
                },
            };

            if let RowStatus::Flagged { error } = &outcome.status {
                tracing::warn!("import row {} flagged: {}", row_number, error);
                report.flagged += 1;
            } else {
                report.accepted += 1;
            }
            report.rows.push(outcome);
        }

        tracing::info!(
            "validated {} import rows: {} accepted, {} flagged",
            rows.len(),
            report.accepted,
            report.flagged
        );

        Ok(report)
    }

    fn check_duplicate(
        &self,
        seen: &mut HashMap<ValidatedUuid, usize>,
        row_number: usize,
        text: String,
    ) -> RowOutcome {
        let status = match ValidatedUuid::parse(&text) {
            Ok(id) => match seen.get(&id) {
                Some(first) => RowStatus::Flagged {
                    error: format!("Duplicate id \"{}\" (first seen on row {})", text, first),
                },
                None => {
                    seen.insert(id, row_number);
                    RowStatus::Accepted
                }
            },
            Err(e) => RowStatus::Flagged {
                error: e.to_string(),
            },
        };

        RowOutcome {
            row: row_number,
            id: Some(text),
            status,
        }
    }
}

/// Parses import rows from JSON text.
///
/// # Errors
///
/// - [`CoreError::ImportParse`] if the text is not JSON.
/// - [`CoreError::InvalidInput`] if the root is not an array or a row is not an object.
/// - [`CoreError::TooManyRows`] if there are more rows than `cfg` allows.
pub fn parse_import_rows(text: &str, cfg: &CoreConfig) -> CoreResult<Vec<ImportRow>> {
    let value: Value = serde_json::from_str(text).map_err(CoreError::ImportParse)?;
    let Value::Array(items) = value else {
        return Err(CoreError::InvalidInput(
            "import must be a JSON array of objects".into(),
        ));
    };

    if items.len() > cfg.max_import_rows() {
        return Err(CoreError::TooManyRows {
            limit: cfg.max_import_rows(),
            actual: items.len(),
        });
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            _ => Err(CoreError::InvalidInput(format!(
                "import row {} is not a JSON object",
                index + 1
            ))),
        })
        .collect()
}

/// Reads and parses an import file.
///
/// # Errors
///
/// Returns [`CoreError::ImportRead`] if the file cannot be read, otherwise as
/// [`parse_import_rows`].
pub fn read_import_file(path: &Path, cfg: &CoreConfig) -> CoreResult<Vec<ImportRow>> {
    let text = std::fs::read_to_string(path).map_err(CoreError::ImportRead)?;
    parse_import_rows(&text, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use subs_uuid::EXAMPLE_UUID;

    fn rows(value: Value) -> Vec<ImportRow> {
        parse_import_rows(&value.to_string(), &CoreConfig::default()).unwrap()
    }

    #[test]
    fn test_validate_rows_mixed_outcomes() {
        let rows = rows(json!([
            {"id": format!("  {}  ", EXAMPLE_UUID), "name": "Basic"},
            {"name": "No id"},
            {"id": null, "name": "Null id"},
            {"id": "", "name": "Empty id"},
            {"id": "not-a-uuid", "name": "Broken"},
            {"id": 42, "name": "Number"},
        ]));

        let report = ImportValidator::new(&CoreConfig::default())
            .validate_rows(&rows)
            .unwrap();

        assert_eq!(report.accepted, 4);
        assert_eq!(report.flagged, 2);
        assert_eq!(report.rows[0].id.as_deref(), Some(EXAMPLE_UUID));
        assert_eq!(report.rows[1].id, None);

        let flagged: Vec<_> = report.flagged_rows().map(|r| r.row).collect();
        assert_eq!(flagged, vec![5, 6]);
        match &report.rows[4].status {
            RowStatus::Flagged { error } => {
                assert!(error.contains("Invalid UUID format"));
                assert!(error.contains("\"not-a-uuid\""));
            }
            other => panic!("Expected flagged row, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rows_flags_duplicates_across_case() {
        let rows = rows(json!([
            {"id": EXAMPLE_UUID},
            {"id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8"},
            {"id": EXAMPLE_UUID.to_uppercase()},
        ]));

        let report = ImportValidator::new(&CoreConfig::default())
            .validate_rows(&rows)
            .unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(report.flagged, 1);
        assert_eq!(
            report.rows[2].status,
            RowStatus::Flagged {
                error: format!(
                    "Duplicate id \"{}\" (first seen on row 1)",
                    EXAMPLE_UUID.to_uppercase()
                )
            }
        );
        assert_eq!(
            report.rows[2].id.as_deref(),
            Some(EXAMPLE_UUID.to_uppercase().as_str())
        );
    }

    #[test]
    fn test_validate_rows_uses_configured_id_field() {
        let cfg = CoreConfig::new(10, "price_id".into()).unwrap();
        let rows = parse_import_rows(
            &json!([{"id": "ignored", "price_id": EXAMPLE_UUID}]).to_string(),
            &cfg,
        )
        .unwrap();

        let report = ImportValidator::new(&cfg).validate_rows(&rows).unwrap();
        assert_eq!(report.accepted, 1);
        assert!(!report.has_flagged_rows());
    }

    #[test]
    fn test_validate_rows_enforces_limit() {
        let cfg = CoreConfig::new(1, "id".into()).unwrap();
        let rows = rows(json!([{}, {}]));

        let result = ImportValidator::new(&cfg).validate_rows(&rows);
        assert!(matches!(
            result,
            Err(CoreError::TooManyRows {
                limit: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_report_serializes_flat_status() {
        let rows = rows(json!([{"id": "bad"}, {"id": EXAMPLE_UUID}]));
        let report = ImportValidator::new(&CoreConfig::default())
            .validate_rows(&rows)
            .unwrap();

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["accepted"], 1);
        assert_eq!(value["rows"][0]["status"], "flagged");
        assert!(value["rows"][0]["error"]
            .as_str()
            .unwrap()
            .contains("\"bad\""));
        assert_eq!(
            value["rows"][1],
            json!({"row": 2, "id": EXAMPLE_UUID, "status": "accepted"})
        );
    }

    #[test]
    fn test_parse_import_rows_rejects_non_array() {
        let result = parse_import_rows(r#"{"id": 1}"#, &CoreConfig::default());
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_import_rows_rejects_non_object_row() {
        let result = parse_import_rows(r#"[{}, "x"]"#, &CoreConfig::default());
        match result {
            Err(CoreError::InvalidInput(msg)) => assert!(msg.contains("row 2")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_import_rows_rejects_bad_json() {
        let result = parse_import_rows("[", &CoreConfig::default());
        assert!(matches!(result, Err(CoreError::ImportParse(_))));
    }

    #[test]
    fn test_read_import_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!([{"id": EXAMPLE_UUID, "name": "Basic"}, {"name": "Family"}])
        )
        .unwrap();

        let rows = read_import_file(file.path(), &CoreConfig::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], "Family");
    }

    #[test]
    fn test_read_import_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_import_file(&dir.path().join("missing.json"), &CoreConfig::default());
        assert!(matches!(result, Err(CoreError::ImportRead(_))));
    }
}
