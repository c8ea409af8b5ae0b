//! Voice HTTP Handlers

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::{ApplicationError, CloneVoice};
use crate::domain::voice::AudioSample;
use crate::infrastructure::http::error::{ApiError, Operation};
use crate::infrastructure::http::state::AppState;

/// multipart 读取错误：超过上传限制的是 413，其余按请求格式错误处理
fn multipart_error(context: &str, e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::debug!(error = %e, "Multipart body hit the size limit");
        ApplicationError::PayloadTooLarge("Request body exceeds the upload size limit".to_string())
    } else {
        ApplicationError::validation(format!("{}: {}", context, e))
    }
}

/// 克隆音色
///
/// multipart 字段: `name`（文本）+ 一个或多个 `files`（音频），其它字段忽略。
/// 文件只读入内存，不落盘
pub async fn clone_voice(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let fail = |e: ApplicationError| ApiError::new(Operation::CloneVoice, e);

    let mut multipart = multipart.map_err(|e| {
        fail(ApplicationError::validation(format!(
            "Expected a multipart/form-data body: {}",
            e.body_text()
        )))
    })?;

    let mut name: Option<String> = None;
    let mut samples: Vec<AudioSample> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| fail(multipart_error("Failed to read multipart field", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| fail(multipart_error("Failed to read name", e)))?,
                );
            }
            "files" => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("sample-{}", samples.len() + 1));
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|e| {
                    fail(multipart_error(&format!("Failed to read file {}", file_name), e))
                })?;

                tracing::debug!(file_name = %file_name, size = data.len(), "Received audio sample");
                samples.push(AudioSample::new(file_name, content_type, data));
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let body = state
        .clone_voice_handler
        .handle(CloneVoice { name, samples })
        .await
        .map_err(fail)?;

    Ok(Json(body))
}
