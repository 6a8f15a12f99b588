//! Checked identifier type.
//!
//! [`ValidatedUuid`] is what the rest of the workspace passes around once a raw identifier has
//! been through [`validate_and_sanitize_uuid`](crate::validate_and_sanitize_uuid).

use crate::{validate_and_sanitize_uuid, Candidate, UuidError, UuidResult, UuidValidation};
use std::hash::{Hash, Hasher};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// A present, well-formed identifier.
///
/// This wrapper guarantees that once constructed, the contained identifier matched the accepted
/// layout (versions 1 to 5, RFC 4122 variant). It keeps the sanitised text exactly as the caller
/// supplied it, so an uppercase identifier is echoed back uppercase.
///
/// # Construction
/// - [`ValidatedUuid::generate`] allocates a new version 4 identifier.
/// - [`ValidatedUuid::parse`] validates a required identifier.
/// - [`ValidatedUuid::resolve`] validates an optional identifier, where absence is allowed.
///
/// # Equality
/// Two values are equal when they denote the same 128-bit identifier, regardless of the case
/// used to spell them.
#[derive(Clone, Debug)]
pub struct ValidatedUuid {
    text: String,
    uuid: Uuid,
}

impl ValidatedUuid {
    /// Generates a new random (version 4) identifier in lowercase hyphenated form.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        Self {
            text: uuid.hyphenated().to_string(),
            uuid,
        }
    }

    /// Validates a required identifier.
    ///
    /// Surrounding whitespace is trimmed before the format check.
    ///
    /// # Errors
    ///
    /// - [`UuidError::Missing`] if `input` is empty.
    /// - [`UuidError::InvalidInput`] with the standard diagnostic if `input` is malformed.
    pub fn parse(input: &str) -> UuidResult<Self> {
        Self::resolve(input)?.ok_or(UuidError::Missing)
    }

    /// Validates an optional identifier.
    ///
    /// Returns `Ok(None)` when nothing was supplied, leaving the caller (usually the backend) to
    /// allocate one.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if a value was supplied but is malformed.
    pub fn resolve(value: impl Into<Candidate>) -> UuidResult<Option<Self>> {
        match validate_and_sanitize_uuid(value) {
            UuidValidation::Absent => Ok(None),
            UuidValidation::Valid(text) => {
                let uuid = Uuid::parse_str(&text)
                    .map_err(|e| UuidError::InvalidInput(format!("{}: {}", text, e)))?;
                Ok(Some(Self { text, uuid }))
            }
            UuidValidation::Invalid(error) => Err(UuidError::InvalidInput(error)),
        }
    }

    /// Returns the sanitised text, case preserved.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the parsed `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl PartialEq for ValidatedUuid {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for ValidatedUuid {}

impl Hash for ValidatedUuid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl fmt::Display for ValidatedUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for ValidatedUuid {
    type Err = UuidError;

    /// Equivalent to [`ValidatedUuid::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidatedUuid::parse(s)
    }
}

impl AsRef<str> for ValidatedUuid {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidatedUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ValidatedUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        ValidatedUuid::parse(&text).map_err(serde::de::Error::custom)
    }
}
