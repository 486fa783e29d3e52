//! REST API for hype meter readings and token history

mod handlers;
mod responses;
mod routes;

pub use responses::*;
pub use routes::*;

use crate::algo::HypeAnalyzer;
use crate::config::ServerConfig;
use anyhow::Result;
use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared state for request handlers
#[derive(Clone)]
pub struct ApiState {
    pub analyzer: Arc<HypeAnalyzer>,
}

impl ApiState {
    pub fn new(analyzer: Arc<HypeAnalyzer>) -> Self {
        Self { analyzer }
    }
}

/// Start the API server, stopping once `shutdown` resolves
pub async fn start_server<F>(
    state: ApiState,
    config: &ServerConfig,
    shutdown: F,
) -> Result<tokio::task::JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_app(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("🌐 API server listening on {}", config.bind_address);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(handle)
}

/// Create the main API application
pub fn create_app(state: ApiState) -> Router {
    Router::new()
        .merge(create_meter_routes())
        .route("/health", get(handlers::health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
