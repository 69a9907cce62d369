//! Churn API Database Bootstrap - Main Entry Point

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use churn_db::application::use_cases::{InitDbUseCase, ResetDbUseCase};
use churn_db::infrastructure::driven_adapters::config::AppConfig;
use churn_db::infrastructure::driven_adapters::database::{churn_schema, DatabaseHandle};
use churn_db::infrastructure::driving_adapters::api_rest::handlers::health;
use churn_db::infrastructure::driving_adapters::api_rest::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the variables directly.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "churn_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Create the process-wide connection handle
    let handle = DatabaseHandle::connect_lazy(&config.database)?;
    let reset_on_startup = config.database.reset_on_startup;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::new(handle);

    // Bring the schema up
    let schema = Arc::new(churn_schema()?);
    if reset_on_startup {
        tracing::warn!("RESET_DB is set, recreating all tables");
        ResetDbUseCase::new(app_state.gateway.clone(), schema).execute().await?;
    } else {
        InitDbUseCase::new(app_state.gateway.clone(), schema).execute().await?;
    }
    app_state.pool_status_use_case.log();

    // Build router
    let app = Router::new()
        .nest("/health", health::router())
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(app_state);

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
