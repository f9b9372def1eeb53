mod chat;
mod config;
mod enhancement;
mod errors;
mod interview;
mod llm_client;
mod models;
mod projection;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::LlmChat;
use crate::config::Config;
use crate::enhancement::LlmEnhancer;
use crate::interview::engine::InterviewEngine;
use crate::interview::questions::QuestionSequence;
use crate::interview::store::SessionStore;
use crate::llm_client::LlmClient;
use crate::projection::referenced_tokens;
use crate::render::ChromiumRenderer;
use crate::routes::build_router;
use crate::state::AppState;

const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

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

    info!("Starting JobPath API v{}", env!("CARGO_PKG_VERSION"));

    // Load the CV template once; every render reuses it
    let template = tokio::fs::read_to_string(&config.template_path)
        .await
        .with_context(|| format!("Failed to read CV template {}", config.template_path.display()))?;
    info!(
        "CV template loaded from {} (tokens: {:?}, escaping: {:?})",
        config.template_path.display(),
        referenced_tokens(&template),
        config.template_escaping
    );

    // Initialize LLM client; chat and enhancement share one connection pool
    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let sessions = SessionStore::new(InterviewEngine::new(Arc::new(QuestionSequence::default())));
    info!("Interview loaded ({} questions)", sessions.engine().total_steps());

    let renderer = ChromiumRenderer::new(
        config.chromium_path.clone(),
        Duration::from_secs(config.render_timeout_secs),
    );

    spawn_eviction(
        sessions.clone(),
        chrono::Duration::minutes(config.session_idle_minutes),
    );

    // Build app state
    let state = AppState {
        sessions,
        chat: Arc::new(LlmChat(llm.clone())),
        enhancer: Arc::new(LlmEnhancer(llm)),
        renderer: Arc::new(renderer),
        template: Arc::from(template),
        escaping: config.template_escaping,
    };

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

/// Periodically drops conversations idle for longer than `max_idle`.
fn spawn_eviction(sessions: SessionStore, max_idle: chrono::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EVICTION_INTERVAL);
        loop {
            ticker.tick().await;
            sessions.evict_idle(max_idle);
        }
    });
}
