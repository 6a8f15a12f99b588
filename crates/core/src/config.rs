//! Import settings.
//!
//! [`CoreConfig`] carries the bulk-import row limit and the name of the column holding each row's
//! identifier. Binaries build it once from flags or `SUBS_*` variables using the
//! `*_from_env_value` parsers below; [`ImportValidator`](crate::ImportValidator) only ever sees the
//! finished value.

use crate::constants::{DEFAULT_ID_FIELD, DEFAULT_MAX_IMPORT_ROWS};
use crate::{CoreError, CoreResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    max_import_rows: usize,
    id_field: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_import_rows: DEFAULT_MAX_IMPORT_ROWS,
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `max_import_rows` is zero or `id_field` is blank.
    pub fn new(max_import_rows: usize, id_field: String) -> CoreResult<Self> {
        if max_import_rows == 0 {
            return Err(CoreError::InvalidInput(
                "max_import_rows must be greater than zero".into(),
            ));
        }

        let id_field = id_field.trim().to_string();
        if id_field.is_empty() {
            return Err(CoreError::InvalidInput("id_field cannot be empty".into()));
        }

        Ok(Self {
            max_import_rows,
            id_field,
        })
    }

    pub fn max_import_rows(&self) -> usize {
        self.max_import_rows
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }
}

/// Parse the import row limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_IMPORT_ROWS`].
pub fn max_import_rows_from_env_value(value: Option<String>) -> CoreResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => v.parse::<usize>().map_err(|e| {
            CoreError::InvalidInput(format!("invalid max import rows '{}': {}", v, e))
        }),
        None => Ok(DEFAULT_MAX_IMPORT_ROWS),
    }
}

/// Parse the import id column from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_ID_FIELD`].
pub fn id_field_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ID_FIELD.to_string())
}
