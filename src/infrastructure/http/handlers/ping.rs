//! Ping Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::PingResponse;
use crate::infrastructure::http::state::AppState;

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        voice_service_configured: state.voice_service_configured,
    })
}
