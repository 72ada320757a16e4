mod config;
mod errors;
mod export;
mod ingest;
mod models;
mod ranking;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingest::fixtures::FixtureResumeParser;
use crate::ingest::parser::{HttpResumeParser, ResumeParser};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ranker API v{}", env!("CARGO_PKG_VERSION"));

    // Parse backend: upstream service when configured, seeded fixtures otherwise
    let parser: Arc<dyn ResumeParser> = match &config.parser_url {
        Some(url) => Arc::new(HttpResumeParser::new(url)?),
        None => Arc::new(FixtureResumeParser::new(config.fixture_seed)),
    };
    info!("Resume parser initialized (backend: {})", parser.backend());

    let sessions = SessionStore::with_ttl(Duration::from_secs(config.session_ttl_secs));
    spawn_session_sweeper(sessions.clone());

    let state = AppState {
        sessions,
        parser,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops idle sessions.
fn spawn_session_sweeper(sessions: SessionStore) {
    let period = (sessions.ttl() / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        loop {
            tick.tick().await;
            sessions.evict_idle().await;
        }
    });
}
