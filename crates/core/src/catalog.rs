//! Subscription catalog types.
//!
//! A [`Provider`] offers [`Plan`]s, and each plan has one or more [`Price`]s (one per currency and
//! billing interval, some of which may be retired). The `New*` variants are validated drafts
//! produced by [`crate::forms`]; their own `id` is optional because the backend allocates one when
//! the caller did not supply it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use subs_uuid::ValidatedUuid;

use crate::{CoreError, CoreResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ValidatedUuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: ValidatedUuid,
    pub provider_id: ValidatedUuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A price point for a plan.
///
/// Amounts are held in minor units (cents, pence) to avoid floating-point rounding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub id: ValidatedUuid,
    pub plan_id: ValidatedUuid,
    pub amount_minor: i64,
    pub currency: String,
    pub interval: BillingInterval,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// How often a price is charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Day => "day",
            BillingInterval::Week => "week",
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
        }
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingInterval {
    type Err = CoreError;

    /// Accepts the interval name in any case, with or without a trailing `ly`
    /// (`"month"`, `"Monthly"`). `"daily"` is accepted for [`BillingInterval::Day`].
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(BillingInterval::Day),
            "week" | "weekly" => Ok(BillingInterval::Week),
            "month" | "monthly" => Ok(BillingInterval::Month),
            "year" | "yearly" => Ok(BillingInterval::Year),
            other => Err(CoreError::InvalidInput(format!(
                "unknown billing interval '{}'",
                other
            ))),
        }
    }
}

/// A validated provider draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewProvider {
    pub id: Option<ValidatedUuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A validated plan draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPlan {
    pub id: Option<ValidatedUuid>,
    pub provider_id: ValidatedUuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A validated price draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPrice {
    pub id: Option<ValidatedUuid>,
    pub plan_id: ValidatedUuid,
    pub amount_minor: i64,
    pub currency: String,
    pub interval: BillingInterval,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_interval_from_str() {
        assert_eq!(
            "month".parse::<BillingInterval>().unwrap(),
            BillingInterval::Month
        );
        assert_eq!(
            " Yearly ".parse::<BillingInterval>().unwrap(),
            BillingInterval::Year
        );
        assert_eq!(
            "DAILY".parse::<BillingInterval>().unwrap(),
            BillingInterval::Day
        );
        assert!("fortnight".parse::<BillingInterval>().is_err());
    }

    #[test]
    fn test_billing_interval_serde_lowercase() {
        let json = serde_json::to_string(&BillingInterval::Week).unwrap();
        assert_eq!(json, "\"week\"");

        let back: BillingInterval = serde_json::from_str("\"year\"").unwrap();
        assert_eq!(back, BillingInterval::Year);
    }

    #[test]
    fn test_price_deserialize_rejects_bad_id() {
        let json = r#"{
            "id": "not-a-uuid",
            "plan_id": "550e8400-e29b-41d4-a716-446655440000",
            "amount_minor": 999,
            "currency": "USD",
            "interval": "month",
            "active": true,
            "created_at": "2026-01-01T00:00:00Z"
        }"#;

        let result: Result<Price, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid UUID format"));
    }
}
