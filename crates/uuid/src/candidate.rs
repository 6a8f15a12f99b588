//! Raw identifier values as supplied by callers.

use std::borrow::Cow;
use std::fmt;

/// An untrusted identifier value, before any validation.
///
/// Form fields and import rows are loosely typed, so an identifier may be missing entirely,
/// explicitly `null`, a string, or some other value (a number, a boolean, a nested object). Rather
/// than rejecting non-string values, they are carried as their canonical string form and left to
/// the format check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Candidate {
    /// The field was not supplied at all.
    #[default]
    Absent,
    /// The field was supplied as an explicit null.
    Null,
    /// The field was supplied as a string.
    Text(String),
    /// The field was supplied as some other value, held in its string form.
    Other(String),
}

impl Candidate {
    /// Wraps a non-string value using its `Display` representation.
    pub fn other(value: impl fmt::Display) -> Self {
        Self::Other(value.to_string())
    }

    /// Returns the string form of this candidate.
    ///
    /// Total over every variant: `Absent` and `Null` coerce to the empty string.
    pub fn coerce_to_string(&self) -> Cow<'_, str> {
        match self {
            Self::Absent | Self::Null => Cow::Borrowed(""),
            Self::Text(text) | Self::Other(text) => Cow::Borrowed(text.as_str()),
        }
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Candidate {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<T: Into<Candidate>> From<Option<T>> for Candidate {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<bool> for Candidate {
    fn from(value: bool) -> Self {
        Self::other(value)
    }
}

impl From<i64> for Candidate {
    fn from(value: i64) -> Self {
        Self::other(value)
    }
}

impl From<u64> for Candidate {
    fn from(value: u64) -> Self {
        Self::other(value)
    }
}

impl From<f64> for Candidate {
    fn from(value: f64) -> Self {
        Self::other(value)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for Candidate {
    /// Strings stay text, `null` stays null, and everything else becomes compact JSON text.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::Other(other.to_string()),
        }
    }
}

#[cfg(feature = "serde")]
impl From<&serde_json::Value> for Candidate {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::String(text) => Self::Text(text.clone()),
            other => Self::Other(other.to_string()),
        }
    }
}

/// Accepts any JSON value. Pair with `#[serde(default)]` so a missing field is [`Candidate::Absent`].
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Candidate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_absent() {
        assert_eq!(Candidate::default(), Candidate::Absent);
    }

    #[test]
    fn test_from_option_none_is_absent() {
        let candidate: Candidate = Option::<&str>::None.into();
        assert_eq!(candidate, Candidate::Absent);

        let candidate: Candidate = Some("abc").into();
        assert_eq!(candidate, Candidate::Text("abc".into()));
    }

    #[test]
    fn test_non_string_values_use_display_form() {
        assert_eq!(Candidate::from(0_i64), Candidate::Other("0".into()));
        assert_eq!(Candidate::from(false), Candidate::Other("false".into()));
        assert_eq!(Candidate::from(1.5_f64), Candidate::Other("1.5".into()));
        assert_eq!(Candidate::from(42_u64), Candidate::Other("42".into()));
    }

    #[test]
    fn test_coerce_to_string_is_total() {
        assert_eq!(Candidate::Absent.coerce_to_string(), "");
        assert_eq!(Candidate::Null.coerce_to_string(), "");
        assert_eq!(Candidate::from(" x ").coerce_to_string(), " x ");
        assert_eq!(Candidate::from(7_i64).coerce_to_string(), "7");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_value() {
        use serde_json::json;

        assert_eq!(Candidate::from(json!(null)), Candidate::Null);
        assert_eq!(Candidate::from(json!("abc")), Candidate::Text("abc".into()));
        assert_eq!(Candidate::from(json!(12)), Candidate::Other("12".into()));
        assert_eq!(Candidate::from(json!(true)), Candidate::Other("true".into()));
        assert_eq!(
            Candidate::from(&json!({"a": 1})),
            Candidate::Other(r#"{"a":1}"#.into())
        );
        assert_eq!(Candidate::from(&json!([])), Candidate::Other("[]".into()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_missing_field_is_absent() {
        #[derive(serde::Deserialize)]
        struct Body {
            #[serde(default)]
            value: Candidate,
        }

        let missing: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.value, Candidate::Absent);

        let null: Body = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(null.value, Candidate::Null);

        let text: Body = serde_json::from_str(r#"{"value": "  abc "}"#).unwrap();
        assert_eq!(text.value, Candidate::Text("  abc ".into()));

        let number: Body = serde_json::from_str(r#"{"value": 3}"#).unwrap();
        assert_eq!(number.value, Candidate::Other("3".into()));
    }
}
