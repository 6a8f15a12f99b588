//! Format checks, sanitisation, and the validate-and-sanitise entry point.
//!
//! Every function here is pure and total. Invalid input is reported as data
//! ([`UuidValidation::Invalid`]), never as a panic or an `Err`.

use crate::{Candidate, UuidError, UuidResult};
use regex::Regex;
use std::sync::LazyLock;

/// Shape placeholder shown in validation messages.
pub const UUID_PLACEHOLDER: &str = "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx";

/// Concrete well-formed identifier shown in validation messages.
pub const EXAMPLE_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

const UUID_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

// Compiled once per process and shared by every caller.
static UUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UUID_PATTERN).expect("UUID_PATTERN is a valid regex"));

/// Outcome of [`validate_and_sanitize_uuid`].
///
/// Exactly one of three states holds, so an identifier and an error can never be reported
/// together:
/// - [`Absent`](Self::Absent): nothing was supplied. Valid; the backend allocates an identifier.
/// - [`Valid`](Self::Valid): a well-formed identifier, trimmed, with the caller's case kept.
/// - [`Invalid`](Self::Invalid): a human-readable diagnostic from
///   [`generate_validation_error_message`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UuidValidation {
    Absent,
    Valid(String),
    Invalid(String),
}

impl UuidValidation {
    /// True for [`Absent`](Self::Absent) and [`Valid`](Self::Valid).
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The sanitised identifier, present only for [`Valid`](Self::Valid).
    pub fn uuid(&self) -> Option<&str> {
        match self {
            Self::Valid(uuid) => Some(uuid.as_str()),
            _ => None,
        }
    }

    /// The diagnostic, present only for [`Invalid`](Self::Invalid).
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(error) => Some(error.as_str()),
            _ => None,
        }
    }

    /// Converts to a `Result`, mapping an absent identifier to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] carrying the diagnostic for malformed input.
    pub fn into_result(self) -> UuidResult<Option<String>> {
        match self {
            Self::Absent => Ok(None),
            Self::Valid(uuid) => Ok(Some(uuid)),
            Self::Invalid(error) => Err(UuidError::InvalidInput(error)),
        }
    }
}

/// Serialises as `{ "isValid": bool, "uuid"?: string, "error"?: string }`.
#[cfg(feature = "serde")]
impl serde::Serialize for UuidValidation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Record<'a> {
            is_valid: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            uuid: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<&'a str>,
        }

        let record = Record {
            is_valid: self.is_valid(),
            uuid: self.uuid(),
            error: self.error(),
        };
        serde::Serialize::serialize(&record, serializer)
    }
}

/// Documents the serialised record for OpenAPI consumers.
#[cfg(feature = "openapi")]
impl<'s> utoipa::ToSchema<'s> for UuidValidation {
    fn schema() -> (
        &'s str,
        utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>,
    ) {
        use utoipa::openapi::schema::{ObjectBuilder, SchemaType};

        (
            "UuidValidation",
            ObjectBuilder::new()
                .property(
                    "isValid",
                    ObjectBuilder::new().schema_type(SchemaType::Boolean),
                )
                .required("isValid")
                .property(
                    "uuid",
                    ObjectBuilder::new()
                        .schema_type(SchemaType::String)
                        .description(Some("Trimmed identifier, present only when one was supplied")),
                )
                .property(
                    "error",
                    ObjectBuilder::new()
                        .schema_type(SchemaType::String)
                        .description(Some("Diagnostic, present only when invalid")),
                )
                .into(),
        )
    }
}

/// Returns true if `value` counts as "no identifier supplied".
///
/// Only [`Candidate::Absent`], [`Candidate::Null`], and the empty string qualify. Whitespace-only
/// text and non-string values such as `0` or `false` are present values.
pub fn is_empty_value(value: &Candidate) -> bool {
    match value {
        Candidate::Absent | Candidate::Null => true,
        Candidate::Text(text) => text.is_empty(),
        Candidate::Other(_) => false,
    }
}

/// Returns true if `text` is, in its entirety, a hyphenated RFC 4122 identifier of version 1 to 5.
///
/// Case-insensitive. No trimming is applied, so surrounding whitespace fails the check.
pub fn is_valid_uuid(text: &str) -> bool {
    UUID_RE.is_match(text)
}

/// Strips leading and trailing whitespace. Internal whitespace and case are left alone.
pub fn sanitize_uuid(text: &str) -> &str {
    text.trim()
}

/// Builds the user-facing diagnostic for a malformed identifier.
///
/// The message quotes the offending value and shows both the expected shape and a concrete
/// example.
pub fn generate_validation_error_message(invalid: &str) -> String {
    format!(
        "Invalid UUID format: \"{}\". Expected format: {} (e.g., {})",
        invalid, UUID_PLACEHOLDER, EXAMPLE_UUID
    )
}

/// Validates an untrusted identifier and returns its sanitised form.
///
/// Absent, `null`, and empty input short-circuits to [`UuidValidation::Absent`]. Anything else is
/// coerced to a string and trimmed before the format check, so surrounding whitespace never causes
/// a rejection, but trimming cannot rescue an otherwise malformed value.
///
/// # Arguments
///
/// * `value` - Raw identifier from a form field, import row, or payload.
pub fn validate_and_sanitize_uuid(value: impl Into<Candidate>) -> UuidValidation {
    let candidate = value.into();
    if is_empty_value(&candidate) {
        return UuidValidation::Absent;
    }

    let text = candidate.coerce_to_string();
    let sanitized = sanitize_uuid(&text);

    if is_valid_uuid(sanitized) {
        UuidValidation::Valid(sanitized.to_owned())
    } else {
        UuidValidation::Invalid(generate_validation_error_message(sanitized))
    }
}
