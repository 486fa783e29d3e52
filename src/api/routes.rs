//! API route definitions

use super::{handlers::*, ApiState};
use axum::{routing::get, Router};

/// Create meter and history routes
pub fn create_meter_routes() -> Router<ApiState> {
    Router::new()
        .route("/meter/:token_id", get(get_meter))
        .route("/history/:token_id", get(get_history))
}
