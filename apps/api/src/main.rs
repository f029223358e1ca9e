mod config;
mod errors;
mod jd_analysis;
mod json_repair;
mod llm_client;
mod models;
mod optimization;
mod pipeline;
mod routes;
mod schema;
mod scoring;
mod sections;
mod state;
mod text;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::VertexClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Vertex AI client
    let llm = VertexClient::new(&config)?;
    info!(
        "LLM client initialized (model: {}, project: {}, location: {})",
        config.model_name, config.project_id, config.location
    );

    let state = AppState::new(config.clone(), Arc::new(llm));
    info!(
        "Retry policy: {} retries, {:?} initial delay",
        state.retry.max_retries, state.retry.initial_delay
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
