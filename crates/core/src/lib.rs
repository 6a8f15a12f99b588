//! # Subs Core
//!
//! Core logic for the subscription catalog: providers, the plans they offer, and the prices of
//! each plan.
//!
//! This crate contains the pure data operations that sit between raw user input and the
//! backend:
//! - Form validation that gates submission of providers, plans, and prices
//! - Bulk import validation that flags malformed or duplicate identifiers row by row
//! - Price grouping and ordering for display
//!
//! Identifier rules live in `subs-uuid`; this crate applies them to catalog records.
//!
//! **No API concerns**: HTTP servers and CLI parsing belong in `api-rest` and `subs-cli`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod forms;
pub mod import;
pub mod pricing;

pub use catalog::{BillingInterval, NewPlan, NewPrice, NewProvider, Plan, Price, Provider};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use forms::{FieldErrors, PlanForm, PriceForm, ProviderForm};
pub use import::{ImportReport, ImportRow, ImportValidator, RowOutcome, RowStatus};
pub use pricing::{group_prices_by_currency, sort_active_first, CurrencyGroup};
