//! # API REST
//!
//! REST API for subscription catalog validation.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation (served as JSON at `/api-docs/openapi.json`)
//! - REST-specific concerns (JSON serialization, CORS, request tracing)
//!
//! Uses `subs-core` for catalog rules and `subs-uuid` for identifier rules. An invalid identifier
//! is a normal result, not an HTTP error: `/uuid/validate` always answers `200` with
//! `isValid: false`.

#![warn(rust_2018_idioms)]

use axum::{extract::State, http::StatusCode, response::Json, routing::get, routing::post, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};

use subs_core::{
    group_prices_by_currency, CoreConfig, CoreError, CurrencyGroup, FieldErrors, ImportReport,
    ImportRow, ImportValidator, NewPlan, NewPrice, NewProvider, PlanForm, Price, PriceForm,
    ProviderForm,
};
use subs_uuid::{sanitize_uuid, validate_and_sanitize_uuid, Candidate, UuidValidation};

/// Application state for the REST API server
///
/// Holds the configuration resolved at startup; handlers never read the environment.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
}

impl AppState {
    pub fn new(cfg: CoreConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ValidateUuidReq {
    /// Any JSON value. Omitted, `null`, and `""` mean "no identifier supplied".
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: Candidate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SanitizeUuidReq {
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SanitizeUuidRes {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateImportReq {
    pub rows: Vec<ImportRow>,
}

#[derive(Debug, Deserialize)]
pub struct GroupPricesReq {
    pub prices: Vec<Price>,
}

/// Body of a `422` form rejection.
#[derive(Debug, Serialize)]
pub struct FieldErrorsRes {
    pub errors: FieldErrors,
}

type FormRejection = (StatusCode, Json<FieldErrorsRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        validate_uuid,
        sanitize_uuid_handler,
        validate_provider,
        validate_plan,
        validate_price,
        validate_import,
        group_prices,
    ),
    components(schemas(
        HealthRes,
        ValidateUuidReq,
        UuidValidation,
        SanitizeUuidReq,
        SanitizeUuidRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
        .route("/uuid/validate", post(validate_uuid))
        .route("/uuid/sanitize", post(sanitize_uuid_handler))
        .route("/providers/validate", post(validate_provider))
        .route("/plans/validate", post(validate_plan))
        .route("/prices/validate", post(validate_price))
        .route("/imports/validate", post(validate_import))
        .route("/prices/grouped", post(group_prices))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        status: "ok".into(),
    })
}

#[utoipa::path(
    post,
    path = "/uuid/validate",
    request_body = ValidateUuidReq,
    responses(
        (status = 200, description = "Validation result", body = UuidValidation)
    )
)]
/// Validate and sanitise a single identifier
///
/// Always answers `200`; malformed input is reported with `isValid: false` and an `error`.
pub async fn validate_uuid(Json(req): Json<ValidateUuidReq>) -> Json<UuidValidation> {
    let validation = validate_and_sanitize_uuid(req.value);
    if let Some(error) = validation.error() {
        tracing::debug!("identifier rejected: {}", error);
    }
    Json(validation)
}

#[utoipa::path(
    post,
    path = "/uuid/sanitize",
    request_body = SanitizeUuidReq,
    responses(
        (status = 200, description = "Trimmed value", body = SanitizeUuidRes)
    )
)]
/// Trim surrounding whitespace from an identifier without validating it
pub async fn sanitize_uuid_handler(Json(req): Json<SanitizeUuidReq>) -> Json<SanitizeUuidRes> {
    Json(SanitizeUuidRes {
        value: sanitize_uuid(&req.value).to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/providers/validate",
    responses(
        (status = 200, description = "Validated provider draft"),
        (status = 422, description = "Field errors")
    )
)]
/// Validate a provider form
pub async fn validate_provider(
    Json(form): Json<ProviderForm>,
) -> Result<Json<NewProvider>, FormRejection> {
    form.validate().map(Json).map_err(form_rejection)
}

#[utoipa::path(
    post,
    path = "/plans/validate",
    responses(
        (status = 200, description = "Validated plan draft"),
        (status = 422, description = "Field errors")
    )
)]
/// Validate a plan form
pub async fn validate_plan(Json(form): Json<PlanForm>) -> Result<Json<NewPlan>, FormRejection> {
    form.validate().map(Json).map_err(form_rejection)
}

#[utoipa::path(
    post,
    path = "/prices/validate",
    responses(
        (status = 200, description = "Validated price draft"),
        (status = 422, description = "Field errors")
    )
)]
/// Validate a price form
pub async fn validate_price(Json(form): Json<PriceForm>) -> Result<Json<NewPrice>, FormRejection> {
    form.validate().map(Json).map_err(form_rejection)
}

#[utoipa::path(
    post,
    path = "/imports/validate",
    responses(
        (status = 200, description = "Per-row import report"),
        (status = 413, description = "Too many rows")
    )
)]
/// Validate the identifier column of every import row
pub async fn validate_import(
    State(state): State<AppState>,
    Json(req): Json<ValidateImportReq>,
) -> Result<Json<ImportReport>, (StatusCode, String)> {
    match ImportValidator::new(&state.cfg).validate_rows(&req.rows) {
        Ok(report) => Ok(Json(report)),
        Err(e @ CoreError::TooManyRows { .. }) => {
            tracing::warn!("Import rejected: {}", e);
            Err((StatusCode::PAYLOAD_TOO_LARGE, e.to_string()))
        }
        Err(e) => {
            tracing::error!("Import validation error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into()))
        }
    }
}

#[utoipa::path(
    post,
    path = "/prices/grouped",
    responses(
        (status = 200, description = "Prices grouped by currency, active first")
    )
)]
/// Group prices by currency for display
pub async fn group_prices(Json(req): Json<GroupPricesReq>) -> Json<Vec<CurrencyGroup>> {
    Json(group_prices_by_currency(req.prices))
}

fn form_rejection(errors: FieldErrors) -> FormRejection {
    tracing::debug!("form rejected: {}", errors);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(FieldErrorsRes { errors }),
    )
}
