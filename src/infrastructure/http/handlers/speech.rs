//! Speech HTTP Handlers

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{ApplicationError, GenerateSpeech};
use crate::infrastructure::http::dto::TextToSpeechRequest;
use crate::infrastructure::http::error::{ApiError, Operation};
use crate::infrastructure::http::state::AppState;

/// 使用克隆音色合成语音
///
/// 成功时音频按上游分块直接流式返回
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextToSpeechRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: ApplicationError| ApiError::new(Operation::TextToSpeech, e);

    let Json(req) = payload.map_err(|e| {
        fail(ApplicationError::validation(format!(
            "Invalid JSON body: {}",
            e.body_text()
        )))
    })?;

    let speech = state
        .generate_speech_handler
        .handle(GenerateSpeech {
            text: req.text,
            voice_id: req.voice_id,
        })
        .await
        .map_err(fail)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, speech.content_type.as_str())
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from_stream(speech.audio))
        .map_err(|e| fail(ApplicationError::internal(format!("Failed to build response: {}", e))))
}
