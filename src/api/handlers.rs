//! API request handlers

use std::sync::Arc;

use super::{responses::*, ApiState};
use crate::core::{MeterResponse, HISTORY_POINTS};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

/// Hype meter reading for a token
pub async fn get_meter(
    State(state): State<ApiState>,
    Path(token_id): Path<String>,
) -> (StatusCode, Json<MeterResponse>) {
    let analyzer = Arc::clone(&state.analyzer);
    let id = token_id.clone();
    let outcome = tokio::task::spawn_blocking(move || analyzer.compute_signal(&id)).await;

    match outcome {
        Ok(Ok(signal)) => (StatusCode::OK, Json(MeterResponse::from(&signal))),
        Ok(Err(e)) => {
            let status = if e.is_insufficient_data() {
                StatusCode::BAD_REQUEST
            } else {
                tracing::error!("Meter computation for {} failed: {}", token_id, e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(MeterResponse::from(&e)))
        }
        Err(e) => {
            tracing::error!("Meter task for {} panicked: {}", token_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MeterResponse::Error {
                    message: "Meter computation failed".to_string(),
                }),
            )
        }
    }
}

/// Newest raw token and social points, for charting
pub async fn get_history(
    State(state): State<ApiState>,
    Path(token_id): Path<String>,
) -> Result<Json<HistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let source = state.analyzer.source();
    let internal_error = |e: crate::database::DatabaseError| {
        tracing::error!("Failed to get history for {}: {}", token_id, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: e.to_string(),
            }),
        )
    };

    let history = source
        .latest_price_observations(&token_id, HISTORY_POINTS)
        .map_err(internal_error)?;
    let social_latest = source
        .latest_social_observations(HISTORY_POINTS)
        .map_err(internal_error)?;

    Ok(Json(HistoryResponse {
        history: history.into_iter().map(HistoryPoint::from).collect(),
        social_latest: social_latest.into_iter().map(SocialPoint::from).collect(),
        token_id,
    }))
}

/// Liveness probe
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "online" }))
}
