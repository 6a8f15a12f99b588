//! Constants used throughout the core crate.

/// Default upper bound on the number of rows accepted in a single import.
pub const DEFAULT_MAX_IMPORT_ROWS: usize = 10_000;

/// Default column holding the row identifier in import files.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Maximum length (in characters) of provider and plan names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length (in characters) of plan descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 2_000;
