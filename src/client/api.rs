//! Proxy API - 客户端到代理服务的请求
//!
//! 只负责收发，状态码和响应体的解释由各界面完成

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Url};
use serde::Serialize;
use std::path::Path;

use super::error::ClientError;

/// 待上传的音频文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl AudioFile {
    pub fn new(file_name: impl Into<String>, data: Bytes) -> Self {
        let file_name = file_name.into();
        let content_type = guess_audio_type(&file_name).map(str::to_string);
        Self {
            file_name,
            content_type,
            data,
        }
    }

    /// 从磁盘读入内存
    pub async fn read(path: &Path) -> Result<Self, ClientError> {
        let data = tokio::fs::read(path).await.map_err(|e| ClientError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample".to_string());
        Ok(Self::new(file_name, Bytes::from(data)))
    }
}

/// 按扩展名推断音频 MIME
fn guess_audio_type(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "flac" => Some("audio/flac"),
        "ogg" | "oga" => Some("audio/ogg"),
        "m4a" => Some("audio/mp4"),
        "webm" => Some("audio/webm"),
        _ => None,
    }
}

/// 代理服务的原始响应
#[derive(Debug, Clone)]
pub struct ProxyReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl ProxyReply {
    /// 2xx
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// 代理服务接口
#[async_trait]
pub trait ProxyApi: Send + Sync {
    /// POST /api/clone-voice
    async fn clone_voice(&self, name: &str, files: &[AudioFile]) -> Result<ProxyReply, ClientError>;

    /// POST /api/text-to-speech
    async fn text_to_speech(&self, text: &str, voice_id: &str) -> Result<ProxyReply, ClientError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextToSpeechBody<'a> {
    text: &'a str,
    voice_id: &'a str,
}

/// 基于 reqwest 的实现
pub struct HttpProxyApi {
    client: Client,
    base_url: Url,
}

impl HttpProxyApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    async fn into_reply(response: reqwest::Response) -> Result<ProxyReply, ClientError> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(ProxyReply {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl ProxyApi for HttpProxyApi {
    async fn clone_voice(&self, name: &str, files: &[AudioFile]) -> Result<ProxyReply, ClientError> {
        let mut form = Form::new().text("name", name.to_string());
        for file in files {
            let mut part = Part::stream_with_length(file.data.clone(), file.data.len() as u64)
                .file_name(file.file_name.clone());
            if let Some(content_type) = &file.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|e| ClientError::Transport(e.to_string()))?;
            }
            form = form.part("files", part);
        }

        tracing::debug!(name = %name, files_count = files.len(), "POST /api/clone-voice");

        let response = self
            .client
            .post(self.endpoint("/api/clone-voice")?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::into_reply(response).await
    }

    async fn text_to_speech(&self, text: &str, voice_id: &str) -> Result<ProxyReply, ClientError> {
        tracing::debug!(voice_id = %voice_id, text_len = text.len(), "POST /api/text-to-speech");

        let response = self
            .client
            .post(self.endpoint("/api/text-to-speech")?)
            .json(&TextToSpeechBody { text, voice_id })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Self::into_reply(response).await
    }
}
