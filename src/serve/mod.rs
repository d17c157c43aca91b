// src/serve/mod.rs

pub mod agriculture;
pub mod ask;
pub mod education;
pub mod employment;
pub mod energy;
mod error;
pub mod population;
pub mod preview;
mod tables;
pub mod transportation;

use crate::advisor::CompletionClient;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

pub use error::ApiError;

/// Shared request context. All of it is read-only: every request re-reads the
/// corpus from disk and builds its own transient state, so there is nothing to
/// lock.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<AppConfig>,
    pub completion: CompletionClient,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Result<Self> {
        let completion = CompletionClient::new(cfg.advisor.clone())?;
        Ok(AppState { cfg: Arc::new(cfg), completion })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/agriculture", agriculture::routes())
        .nest("/api/education", education::routes())
        .nest("/api/employment", employment::routes())
        .nest("/api/energy", energy::routes())
        .nest("/api/transportation", transportation::routes())
        .nest("/api/population", population::routes())
        .nest("/api/growth-rate", population::growth_routes())
        .nest("/api/test", preview::routes())
        .route("/api/ask", post(ask::ask))
        .route("/api/ask/debug", get(ask::debug))
        .with_state(state)
}

pub async fn run(cfg: AppConfig) -> Result<()> {
    let bind = cfg.bind.clone();
    let state = AppState::new(cfg)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding `{bind}`"))?;
    info!(addr = %listener.local_addr()?, "serving");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
