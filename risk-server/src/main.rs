//! Dropout Risk Server
//!
//! HTTP front for the trained risk classifier and the recommendation
//! sources.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  DROPOUT RISK SERVER                 │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌─────────────┐   ┌──────────────┐  │
//! │  │  Router   │──▶│  Predictor  │   │ Recommender  │  │
//! │  │  (Axum)   │   │ (bundle)    │   │ Gemini/rules │  │
//! │  └─────┬─────┘   └─────────────┘   └──────────────┘  │
//! │        └──────────────▲──────────────────▲           │
//! │                       └── AppState ──────┘           │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use dropout_core::{ModelBundle, Predictor, Recommender};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "dropout_server=debug,dropout_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Dropout Risk Server starting ({})...", config.environment);
    tracing::info!("Loading model from {}", config.model_path);

    let bundle = ModelBundle::load(&config.model_path)
        .with_context(|| format!("cannot start without a model bundle ({})", config.model_path))?;
    tracing::info!(
        "Model ready: {} trees, classes {:?}",
        bundle.model.n_trees(),
        bundle.le_target.classes()
    );

    // Build application state
    let state = AppState {
        predictor: bundle.into_predictor(),
        recommender: Recommender::from_config(config.gemini()),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub recommender: Recommender,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/recommend", post(handlers::recommend::recommend))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
