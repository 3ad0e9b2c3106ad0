//! JSON API over the tailoring engine

pub mod errors;
pub mod routes;

use crate::config::Config;
use crate::processing::engine::TailoringEngine;
use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use routes::build_router;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TailoringEngine>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: Arc::new(TailoringEngine::new(config)),
        }
    }
}

/// Bind to `host:port` and serve until the process is stopped
pub async fn run_server(config: &Config, host: &str, port: u16) -> Result<()> {
    let state = AppState::new(config);
    let app = build_router(state).layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
