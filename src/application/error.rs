//! 应用层错误定义
//!
//! 所有服务端失败在这里归入五类，由 HTTP 边界统一转换为 JSON 响应

use thiserror::Error;

use crate::application::ports::VoiceServiceError;
use crate::domain::voice::VoiceError;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    PayloadTooLarge,
    Configuration,
    Upstream,
    Transport,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Configuration => "configuration",
            Self::Upstream => "upstream",
            Self::Transport => "transport",
            Self::Internal => "internal",
        }
    }
}

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求缺少必需数据
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 请求体超过上传大小限制
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// 服务端配置缺失（详情只写日志）
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 外部服务返回错误状态码
    #[error("Upstream error: HTTP {status}")]
    UpstreamError {
        status: u16,
        detail: serde_json::Value,
    },

    /// 外部服务无响应
    #[error("No response from external service: {0}")]
    NoResponse(String),

    /// 内部错误（详情只写日志）
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError(_) => ErrorCategory::Validation,
            Self::PayloadTooLarge(_) => ErrorCategory::PayloadTooLarge,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::UpstreamError { .. } => ErrorCategory::Upstream,
            Self::NoResponse(_) => ErrorCategory::Transport,
            Self::InternalError(_) => ErrorCategory::Internal,
        }
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<VoiceServiceError> for ApplicationError {
    fn from(err: VoiceServiceError) -> Self {
        match err {
            VoiceServiceError::Upstream { status, detail } => {
                Self::UpstreamError { status, detail }
            }
            VoiceServiceError::NoResponse(msg) => Self::NoResponse(msg),
            VoiceServiceError::Request(msg) | VoiceServiceError::InvalidResponse(msg) => {
                Self::InternalError(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_errors_map_to_categories() {
        let upstream: ApplicationError = VoiceServiceError::Upstream {
            status: 422,
            detail: json!("bad audio"),
        }
        .into();
        assert_eq!(upstream.category(), ErrorCategory::Upstream);

        let transport: ApplicationError =
            VoiceServiceError::NoResponse("connection refused".to_string()).into();
        assert_eq!(transport.category(), ErrorCategory::Transport);

        let local: ApplicationError =
            VoiceServiceError::Request("bad mime".to_string()).into();
        assert_eq!(local.category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_domain_errors_are_validation() {
        let err: ApplicationError = VoiceError::NoAudioFiles.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(
            err.to_string(),
            "Validation error: at least one audio file is required"
        );
    }
}
