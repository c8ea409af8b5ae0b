//! Data Transfer Objects

use serde::{Deserialize, Serialize};

/// 语音合成请求
///
/// 字段缺失时由 handler 返回校验错误，而不是反序列化失败
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
}

/// Ping 响应
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub voice_service_configured: bool,
}
