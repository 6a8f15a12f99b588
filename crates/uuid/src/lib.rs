//! Identifier validation and sanitisation utilities.
//!
//! Providers, plans, and prices are identified by RFC 4122 UUIDs. Identifiers arrive from form
//! fields, bulk-import rows, and API payloads, so they are untrusted and loosely typed: a field may
//! be missing, `null`, a string with stray whitespace, or some non-string value.
//!
//! This crate provides:
//! - [`Candidate`], a sum type over the shapes a raw identifier field can take.
//! - Pure validation functions ([`is_empty_value`], [`is_valid_uuid`], [`sanitize_uuid`],
//!   [`validate_and_sanitize_uuid`], [`generate_validation_error_message`]).
//! - [`ValidatedUuid`], a wrapper that *guarantees* a present, well-formed identifier once
//!   constructed.
//!
//! ## Accepted identifier form
//! - Layout: `8-4-4-4-12` hexadecimal digits separated by hyphens (36 characters)
//! - Version digit: `1` to `5`
//! - Variant digit: `8`, `9`, `a`, or `b`
//! - Case: any; the sanitised value keeps the caller's case
//! - Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! ## Absent identifiers
//! A missing, `null`, or empty identifier is *not* an error. It means "no identifier supplied"
//! and the backend allocates one. Whitespace-only input is present and therefore malformed.

mod candidate;
mod service;
mod validation;

pub use candidate::Candidate;
pub use service::{Uuid, ValidatedUuid};
pub use validation::{
    generate_validation_error_message, is_empty_value, is_valid_uuid, sanitize_uuid,
    validate_and_sanitize_uuid, UuidValidation, EXAMPLE_UUID, UUID_PLACEHOLDER,
};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UuidError {
    /// Invalid input provided
    #[error("{0}")]
    InvalidInput(String),
    /// No identifier was supplied where one is required
    #[error("identifier is required")]
    Missing,
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
