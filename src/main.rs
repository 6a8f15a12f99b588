use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use subs_core::CoreConfig;
use subs_core::config::{id_field_from_env_value, max_import_rows_from_env_value};

/// Main entry point for the subscription catalog service
///
/// Resolves configuration once from the environment (and `.env`, if present), then serves the
/// REST API until the process is stopped.
///
/// # Environment Variables
/// - `SUBS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SUBS_MAX_IMPORT_ROWS`: Maximum rows accepted per import (default: 10000)
/// - `SUBS_IMPORT_ID_FIELD`: Import column holding the row identifier (default: "id")
/// - `RUST_LOG`: Log filter, in addition to the default `subs_run=info`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("subs_run=info".parse()?)
                .add_directive("subs_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::new(
        max_import_rows_from_env_value(std::env::var("SUBS_MAX_IMPORT_ROWS").ok())?,
        id_field_from_env_value(std::env::var("SUBS_IMPORT_ID_FIELD").ok()),
    )?;

    let rest_addr = std::env::var("SUBS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting subs REST on {}", rest_addr);
    tracing::info!(
        "Import limits: max_rows={}, id_field={}",
        cfg.max_import_rows(),
        cfg.id_field()
    );

    let app = api_rest::router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
