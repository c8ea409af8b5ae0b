//! HTTP Error Handling
//!
//! 应用层错误在这里统一转换为 `{ error, details }` JSON 响应

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{ApplicationError, ErrorCategory};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: serde_json::Value,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: impl Into<serde_json::Value>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

/// 出错的接口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CloneVoice,
    TextToSpeech,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloneVoice => "clone_voice",
            Self::TextToSpeech => "text_to_speech",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Self::CloneVoice => "Failed to clone voice",
            Self::TextToSpeech => "Failed to generate speech",
        }
    }

    fn missing_data_message(&self) -> &'static str {
        match self {
            Self::CloneVoice => "Missing required data: name and audio files",
            Self::TextToSpeech => "Missing required data: text and voiceId",
        }
    }

    fn service_name(&self) -> &'static str {
        match self {
            Self::CloneVoice => "voice cloning service",
            Self::TextToSpeech => "speech synthesis service",
        }
    }
}

/// API 错误
#[derive(Debug)]
pub struct ApiError {
    operation: Operation,
    source: ApplicationError,
}

impl ApiError {
    pub fn new(operation: Operation, source: ApplicationError) -> Self {
        Self { operation, source }
    }

    pub fn category(&self) -> ErrorCategory {
        self.source.category()
    }

    /// 响应状态码
    pub fn status(&self) -> StatusCode {
        match &self.source {
            ApplicationError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApplicationError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApplicationError::UpstreamError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApplicationError::ConfigurationError(_)
            | ApplicationError::NoResponse(_)
            | ApplicationError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 响应体
    ///
    /// 配置错误和内部错误不向调用方暴露具体原因
    pub fn body(&self) -> ErrorResponse {
        let op = self.operation;
        match &self.source {
            ApplicationError::ValidationError(msg) => {
                ErrorResponse::new(op.missing_data_message(), msg.clone())
            }
            ApplicationError::PayloadTooLarge(msg) => {
                ErrorResponse::new("Upload too large", msg.clone())
            }
            ApplicationError::ConfigurationError(_) => ErrorResponse::new(
                "Server configuration error",
                "The voice service is not configured",
            ),
            ApplicationError::UpstreamError { detail, .. } => {
                ErrorResponse::new(op.failure_message(), detail.clone())
            }
            ApplicationError::NoResponse(_) => ErrorResponse::new(
                op.failure_message(),
                format!("No response received from the {}", op.service_name()),
            ),
            ApplicationError::InternalError(_) => {
                ErrorResponse::new(op.failure_message(), "An unexpected error occurred")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let operation = self.operation.as_str();
        let category = self.category().as_str();

        match &self.source {
            ApplicationError::ValidationError(msg) => {
                tracing::warn!(operation, category, error = %msg, "Missing required data");
            }
            ApplicationError::PayloadTooLarge(msg) => {
                tracing::warn!(operation, category, error = %msg, "Upload too large");
            }
            ApplicationError::UpstreamError { status, detail } => {
                tracing::error!(operation, category, status, detail = %detail, "Voice service error response");
            }
            ApplicationError::NoResponse(msg) => {
                tracing::error!(operation, category, error = %msg, "No response received from voice service");
            }
            ApplicationError::ConfigurationError(msg) | ApplicationError::InternalError(msg) => {
                tracing::error!(operation, category, error = %msg, "Request failed");
            }
        }

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::new(
            Operation::CloneVoice,
            ApplicationError::validation("voice name is required"),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.body();
        assert_eq!(body.error, "Missing required data: name and audio files");
        assert_eq!(body.details, json!("voice name is required"));
    }

    #[test]
    fn test_payload_too_large_is_not_missing_data() {
        let err = ApiError::new(
            Operation::CloneVoice,
            ApplicationError::PayloadTooLarge("limit exceeded".to_string()),
        );
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.category(), ErrorCategory::PayloadTooLarge);
        let body = err.body();
        assert_eq!(body.error, "Upload too large");
        assert_eq!(body.details, json!("limit exceeded"));
    }

    #[test]
    fn test_configuration_error_hides_cause() {
        let err = ApiError::new(
            Operation::CloneVoice,
            ApplicationError::ConfigurationError("ELEVENLABS_API_KEY is not set".to_string()),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_string(&err.body()).unwrap();
        assert!(!body.contains("ELEVENLABS_API_KEY"));
    }

    #[test]
    fn test_upstream_status_is_relayed() {
        let err = ApiError::new(
            Operation::TextToSpeech,
            ApplicationError::UpstreamError {
                status: 401,
                detail: json!({ "status": "invalid_api_key" }),
            },
        );
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        let body = err.body();
        assert_eq!(body.error, "Failed to generate speech");
        assert_eq!(body.details, json!({ "status": "invalid_api_key" }));
    }

    #[test]
    fn test_invalid_upstream_status_becomes_bad_gateway() {
        let err = ApiError::new(
            Operation::CloneVoice,
            ApplicationError::UpstreamError {
                status: 42,
                detail: json!("?"),
            },
        );
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_no_response_names_service() {
        let err = ApiError::new(
            Operation::CloneVoice,
            ApplicationError::NoResponse("connection refused".to_string()),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body().details,
            json!("No response received from the voice cloning service")
        );
    }

    #[test]
    fn test_internal_error_is_generic() {
        let err = ApiError::new(
            Operation::TextToSpeech,
            ApplicationError::internal("invalid header value"),
        );
        let body = err.body();
        assert_eq!(body.error, "Failed to generate speech");
        assert_eq!(body.details, json!("An unexpected error occurred"));
    }
}
