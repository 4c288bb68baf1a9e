//! Pippy - a supportive penguin companion
//!
//! A Rust backend running a deterministic dialogue state machine, with
//! optional hosted-model generation for casual chat.

mod api;
mod catalog;
mod llm;
mod persona;
mod quality;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use llm::{LlmConfig, ModelRegistry};
use runtime::{ConversationSettings, DisabledGenerator, Generator, RegistryGenerator, SessionManager};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pippy=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("PIPPY_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let seed: Option<u64> = std::env::var("PIPPY_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok());

    let session_idle = std::env::var("PIPPY_SESSION_IDLE_SECS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .map_or(DEFAULT_SESSION_IDLE, Duration::from_secs);

    // Initialize generation models
    let llm_config = LlmConfig::from_env();
    let llm_registry = Arc::new(ModelRegistry::new(&llm_config));

    let generator: Arc<dyn Generator> = if llm_registry.has_models() {
        tracing::info!(
            models = ?llm_registry.available_models(),
            timeout_ms = %llm_config.generation_timeout.as_millis(),
            "Generation models initialized"
        );
        Arc::new(RegistryGenerator::new(llm_registry))
    } else {
        tracing::warn!("Generation disabled; using scripted replies only");
        Arc::new(DisabledGenerator)
    };

    if let Some(seed) = seed {
        tracing::info!(seed, "Using fixed reply seed");
    }

    // Create application state
    let sessions = SessionManager::new(
        generator,
        ConversationSettings {
            generation_timeout: llm_config.generation_timeout,
            seed,
        },
    );
    let state = AppState::new(sessions);
    state
        .sessions
        .spawn_idle_sweeper(session_idle, SESSION_SWEEP_INTERVAL);
    tracing::info!(idle_secs = session_idle.as_secs(), "Idle session sweep enabled");

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true).deflate(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Pippy server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
