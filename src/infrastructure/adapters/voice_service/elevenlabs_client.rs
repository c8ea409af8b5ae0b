//! ElevenLabs Client - 调用 ElevenLabs 音色克隆/语音合成 API
//!
//! 实现 VoiceServicePort trait
//!
//! 外部 API:
//! POST {base}/v1/voices/add
//!   Request: multipart/form-data, name + files (可多个)
//!   Response: {"voice_id": "..."}
//! POST {base}/v1/text-to-speech/{voice_id}
//!   Request: {"text": "...", "model_id": "..."}  (JSON)
//!   Response: audio/mpeg binary
//! 两个接口都通过 `xi-api-key` header 鉴权

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Url};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    ApiKey, SynthesizedSpeech, VoiceServiceError, VoiceServicePort,
};
use crate::domain::speech::SpeechGenerationRequest;
use crate::domain::voice::VoiceCreationRequest;

/// 鉴权 header
const API_KEY_HEADER: &str = "xi-api-key";

/// 上游未声明类型时使用的音频 MIME
const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// 语音合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesizeHttpRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// 语音合成模型
    pub model_id: String,
    /// 请求超时时间（秒），None 表示不设置超时
    pub timeout_secs: Option<u64>,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            timeout_secs: None,
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建新的客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, VoiceServiceError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| VoiceServiceError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 构造 {base}/v1/... URL，每个 segment 单独做百分号编码
    fn endpoint(&self, segments: &[&str]) -> Result<Url, VoiceServiceError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| VoiceServiceError::Request(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| VoiceServiceError::Request("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    fn build_form(request: &VoiceCreationRequest) -> Result<Form, VoiceServiceError> {
        let mut form = Form::new().text("name", request.name().as_str().to_string());

        for sample in request.samples() {
            let mut part = Part::stream_with_length(sample.data().clone(), sample.len() as u64)
                .file_name(sample.file_name().to_string());
            if let Some(content_type) = sample.content_type() {
                part = part.mime_str(content_type).map_err(|e| {
                    VoiceServiceError::Request(format!(
                        "invalid content type {:?} for {}: {}",
                        content_type,
                        sample.file_name(),
                        e
                    ))
                })?;
            }
            form = form.part("files", part);
        }

        Ok(form)
    }

    /// 把非 2xx 响应转换为 Upstream 错误
    async fn upstream_error(response: reqwest::Response) -> VoiceServiceError {
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        let detail = upstream_detail(&body);

        tracing::warn!(status = status, detail = %detail, "Voice service error response");

        VoiceServiceError::Upstream { status, detail }
    }
}

/// 区分「请求没发出去」和「发出去了但没有响应」
fn classify_send_error(e: reqwest::Error) -> VoiceServiceError {
    if e.is_builder() {
        VoiceServiceError::Request(e.to_string())
    } else if e.is_timeout() {
        VoiceServiceError::NoResponse(format!("request timed out: {}", e))
    } else if e.is_connect() {
        VoiceServiceError::NoResponse(format!("cannot connect to voice service: {}", e))
    } else {
        VoiceServiceError::NoResponse(e.to_string())
    }
}

/// 提取上游错误详情
///
/// JSON 且带非空 `detail` 字段时取该字段，其余 JSON 原样返回，非 JSON 作为字符串返回
pub fn upstream_detail(body: &[u8]) -> serde_json::Value {
    use serde_json::Value;

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(detail) if !is_blank(detail) => detail.clone(),
            _ => Value::Object(map),
        },
        Ok(other) => other,
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}

fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[async_trait]
impl VoiceServicePort for ElevenLabsClient {
    async fn create_voice(
        &self,
        api_key: &ApiKey,
        request: &VoiceCreationRequest,
    ) -> Result<serde_json::Value, VoiceServiceError> {
        let url = self.endpoint(&["voices", "add"])?;
        let form = Self::build_form(request)?;

        tracing::debug!(
            url = %url,
            name = %request.name(),
            files_count = request.samples().len(),
            "Sending add-voice request"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key.expose())
            .multipart(form)
            .send()
            .await
            .map_err(classify_send_error)?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| VoiceServiceError::InvalidResponse(format!("Failed to read JSON: {}", e)))?;

        tracing::debug!(body = %body, "Received add-voice response");

        Ok(body)
    }

    async fn synthesize(
        &self,
        api_key: &ApiKey,
        request: &SpeechGenerationRequest,
    ) -> Result<SynthesizedSpeech, VoiceServiceError> {
        let url = self.endpoint(&["text-to-speech", request.voice_id().as_str()])?;
        let body = SynthesizeHttpRequest {
            text: request.text().as_str(),
            model_id: &self.config.model_id,
        };

        tracing::debug!(
            url = %url,
            text_len = body.text.len(),
            model_id = %body.model_id,
            "Sending text-to-speech request"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key.expose())
            .header(header::ACCEPT, DEFAULT_AUDIO_CONTENT_TYPE)
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_AUDIO_CONTENT_TYPE)
            .to_string();

        let audio = response
            .bytes_stream()
            .map_err(|e| VoiceServiceError::NoResponse(format!("audio stream interrupted: {}", e)));

        Ok(SynthesizedSpeech {
            content_type,
            audio: Box::pin(audio),
        })
    }
}
