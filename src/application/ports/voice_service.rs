//! Voice Service Port - 外部音色克隆/语音合成服务抽象
//!
//! 具体实现在 infrastructure/adapters/voice_service 层

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use thiserror::Error;

use crate::domain::speech::SpeechGenerationRequest;
use crate::domain::voice::VoiceCreationRequest;

/// 外部服务凭证
///
/// Debug 输出不包含密钥内容
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// 空字符串视为未配置
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// 外部服务错误
#[derive(Debug, Error)]
pub enum VoiceServiceError {
    /// 外部服务返回了非 2xx 状态码
    #[error("voice service responded with HTTP {status}")]
    Upstream {
        status: u16,
        detail: serde_json::Value,
    },

    /// 请求已发出但没有收到响应（连接失败、超时、连接中断）
    #[error("no response from voice service: {0}")]
    NoResponse(String),

    /// 构建请求失败
    #[error("failed to build voice service request: {0}")]
    Request(String),

    /// 响应无法解析
    #[error("invalid voice service response: {0}")]
    InvalidResponse(String),
}

/// 合成音频字节流
pub type AudioStream = Pin<Box<dyn Stream<Item = Result<Bytes, VoiceServiceError>> + Send>>;

/// 语音合成结果
pub struct SynthesizedSpeech {
    /// 音频 MIME 类型
    pub content_type: String,
    /// 音频数据，按上游分块到达的顺序
    pub audio: AudioStream,
}

impl std::fmt::Debug for SynthesizedSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesizedSpeech")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Voice Service Port
#[async_trait]
pub trait VoiceServicePort: Send + Sync {
    /// 用音频样本创建克隆音色
    ///
    /// 成功时原样返回外部服务的 JSON 响应体（应包含 `voice_id`）
    async fn create_voice(
        &self,
        api_key: &ApiKey,
        request: &VoiceCreationRequest,
    ) -> Result<serde_json::Value, VoiceServiceError>;

    /// 使用已克隆的音色合成语音
    async fn synthesize(
        &self,
        api_key: &ApiKey,
        request: &SpeechGenerationRequest,
    ) -> Result<SynthesizedSpeech, VoiceServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_unconfigured() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new("  ").is_none());
        assert_eq!(ApiKey::new("sk_123").unwrap().expose(), "sk_123");
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("sk_secret").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }
}
