// src/main.rs

use std::str::FromStr;
use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use humanizer::api::http_router;
use humanizer::config::HumanizerConfig;
use humanizer::engine::{HumanizationEngine, OpenAiProvider};
use humanizer::state::AppState;
use humanizer::store::TransformationStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = HumanizerConfig::from_env();

    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting humanizer backend");
    info!("Model: {}", config.model);
    info!(
        "Provider: {}",
        if config.openai_api_key.is_some() { "configured" } else { "not configured (local cleanup only)" }
    );

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.sqlite_max_connections)
        .connect_with(connect_options)
        .await?;

    let store = TransformationStore::new(pool);
    store.init().await?;

    let provider = config.openai_api_key.clone().map(|key| {
        Arc::new(OpenAiProvider::new(
            key,
            config.openai_base_url.clone(),
            config.model.clone(),
        )) as Arc<dyn humanizer::engine::GenerativeProvider>
    });
    let engine = HumanizationEngine::new(provider, config.engine_config());

    let app_state = Arc::new(AppState::new(store, engine));

    let cors = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => CorsLayer::permissive(),
    };

    // Deep humanization worst case is 3 passes of retry+backoff; give
    // requests room before the server cuts them off.
    let app = http_router(app_state)
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(300)))
        .layer(TraceLayer::new_for_http());

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server running on http://{bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
