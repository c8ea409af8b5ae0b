//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/clone-voice       POST  上传音频样本克隆音色（multipart: name, files）
//! - /api/text-to-speech    POST  使用克隆音色合成语音（JSON: text, voiceId）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/clone-voice", post(handlers::clone_voice))
        .route("/text-to-speech", post(handlers::text_to_speech))
}
