//! Form validation for providers, plans, and prices.
//!
//! Forms carry raw, loosely-typed field values exactly as submitted. Validation collects an
//! error for every failing field (not just the first) so the caller can flag them all at once,
//! and only produces a draft when every field passes.
//!
//! Identifier fields follow two rules:
//! - A record's **own** `id` is optional. Absent means the backend allocates one; a supplied value
//!   must be well-formed.
//! - **Reference** ids (`provider_id`, `plan_id`) are required.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use subs_uuid::{Candidate, UuidError, ValidatedUuid};

use crate::catalog::{BillingInterval, NewPlan, NewPrice, NewProvider};
use crate::constants::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::{CoreError, CoreResult};

/// Per-field validation messages, in the order the fields were checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, message)| (*name, message.as_str()))
    }

    fn into_result<T>(self, value: Option<T>) -> Result<T, FieldErrors> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

/// Serialises as a JSON object of `field -> message`.
impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Raw provider form.
///
/// Every field accepts any JSON value; a wrong type is reported as a field error by
/// [`ProviderForm::validate`] rather than failing deserialisation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProviderForm {
    #[serde(default)]
    pub id: Candidate,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub website: Value,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlanForm {
    #[serde(default)]
    pub id: Candidate,
    #[serde(default)]
    pub provider_id: Candidate,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub description: Value,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PriceForm {
    #[serde(default)]
    pub id: Candidate,
    #[serde(default)]
    pub plan_id: Candidate,
    #[serde(default)]
    pub amount_minor: Value,
    #[serde(default)]
    pub currency: Value,
    #[serde(default)]
    pub interval: Value,
    /// Defaults to active when missing or `null`.
    #[serde(default)]
    pub active: Value,
}

impl ProviderForm {
    pub fn validate(&self) -> Result<NewProvider, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = own_id(&mut errors, "id", &self.id);
        let name = required_text(&mut errors, "name", &self.name, MAX_NAME_LEN);
        let website = optional_text(&mut errors, "website", &self.website);
        if let Some(url) = &website {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push("website", "must start with http:// or https://");
            }
        }

        let draft = name.map(|name| NewProvider { id, name, website });
        errors.into_result(draft)
    }

    /// Like [`validate`](Self::validate), but as a [`CoreResult`].
    pub fn submit(&self) -> CoreResult<NewProvider> {
        self.validate().map_err(reject)
    }
}

impl PlanForm {
    pub fn validate(&self) -> Result<NewPlan, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = own_id(&mut errors, "id", &self.id);
        let provider_id = required_id(&mut errors, "provider_id", &self.provider_id);
        let name = required_text(&mut errors, "name", &self.name, MAX_NAME_LEN);
        let description = optional_text(&mut errors, "description", &self.description);
        if let Some(text) = &description {
            if text.chars().count() > MAX_DESCRIPTION_LEN {
                errors.push(
                    "description",
                    format!("must be at most {} characters", MAX_DESCRIPTION_LEN),
                );
            }
        }

        let draft = match (provider_id, name) {
            (Some(provider_id), Some(name)) => Some(NewPlan {
                id,
                provider_id,
                name,
                description,
            }),
            _ => None,
        };
        errors.into_result(draft)
    }

    pub fn submit(&self) -> CoreResult<NewPlan> {
        self.validate().map_err(reject)
    }
}

impl PriceForm {
    pub fn validate(&self) -> Result<NewPrice, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = own_id(&mut errors, "id", &self.id);
        let plan_id = required_id(&mut errors, "plan_id", &self.plan_id);

        let amount_minor = match &self.amount_minor {
            Value::Null => {
                errors.push("amount_minor", "is required");
                None
            }
            Value::Number(n) => match n.as_i64() {
                Some(amount) if amount < 0 => {
                    errors.push("amount_minor", "must not be negative");
                    None
                }
                Some(amount) => Some(amount),
                None => {
                    errors.push("amount_minor", AMOUNT_TYPE_MESSAGE);
                    None
                }
            },
            _ => {
                errors.push("amount_minor", AMOUNT_TYPE_MESSAGE);
                None
            }
        };

        let currency = match self.currency.as_str().map(str::trim) {
            Some(code) if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) => {
                Some(code.to_ascii_uppercase())
            }
            _ => {
                errors.push("currency", "must be a 3-letter ISO 4217 code");
                None
            }
        };

        let interval = match self.interval.as_str().map(str::parse::<BillingInterval>) {
            Some(Ok(interval)) => Some(interval),
            _ => {
                errors.push("interval", "must be one of day, week, month, year");
                None
            }
        };

        let active = match &self.active {
            Value::Null => Some(true),
            Value::Bool(active) => Some(*active),
            _ => {
                errors.push("active", "must be true or false");
                None
            }
        };

        let draft = match (plan_id, amount_minor, currency, interval, active) {
            (Some(plan_id), Some(amount_minor), Some(currency), Some(interval), Some(active)) => {
                Some(NewPrice {
                    id,
                    plan_id,
                    amount_minor,
                    currency,
                    interval,
                    active,
                })
            }
            _ => None,
        };
        errors.into_result(draft)
    }

    pub fn submit(&self) -> CoreResult<NewPrice> {
        self.validate().map_err(reject)
    }
}

const AMOUNT_TYPE_MESSAGE: &str = "must be a whole number of minor units";
const TEXT_TYPE_MESSAGE: &str = "must be a string";

fn reject(errors: FieldErrors) -> CoreError {
    tracing::debug!("form rejected: {}", errors);
    CoreError::Validation(errors)
}

fn own_id(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Candidate,
) -> Option<ValidatedUuid> {
    match ValidatedUuid::resolve(value.clone()) {
        Ok(id) => id,
        Err(e) => {
            errors.push(field, e.to_string());
            None
        }
    }
}

fn required_id(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Candidate,
) -> Option<ValidatedUuid> {
    match ValidatedUuid::resolve(value.clone()) {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            errors.push(field, UuidError::Missing.to_string());
            None
        }
        Err(e) => {
            errors.push(field, e.to_string());
            None
        }
    }
}

/// Missing, `null`, and blank strings are all "is required".
fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Value,
    max_len: usize,
) -> Option<String> {
    let text = match value {
        Value::Null => "",
        Value::String(text) => text.trim(),
        _ => {
            errors.push(field, TEXT_TYPE_MESSAGE);
            return None;
        }
    };
    if text.is_empty() {
        errors.push(field, "is required");
        return None;
    }
    if text.chars().count() > max_len {
        errors.push(field, format!("must be at most {} characters", max_len));
        return None;
    }
    Some(text.to_string())
}

fn optional_text(errors: &mut FieldErrors, field: &'static str, value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        _ => {
            errors.push(field, TEXT_TYPE_MESSAGE);
            None
        }
    }
}
