//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::CloneVoice;
use crate::application::error::ApplicationError;
use crate::application::ports::{ApiKey, VoiceServicePort};
use crate::domain::voice::VoiceCreationRequest;

/// CloneVoice Handler
///
/// 顺序: 校验输入 -> 检查凭证 -> 调用外部服务
pub struct CloneVoiceHandler {
    voice_service: Arc<dyn VoiceServicePort>,
    api_key: Option<ApiKey>,
}

impl CloneVoiceHandler {
    pub fn new(voice_service: Arc<dyn VoiceServicePort>, api_key: Option<ApiKey>) -> Self {
        Self {
            voice_service,
            api_key,
        }
    }

    pub async fn handle(&self, command: CloneVoice) -> Result<serde_json::Value, ApplicationError> {
        tracing::info!(
            name = ?command.name,
            files_count = command.samples.len(),
            "Received request to clone voice"
        );

        let request = VoiceCreationRequest::new(command.name, command.samples)?;

        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ApplicationError::ConfigurationError("voice service API key is not set".to_string())
        })?;

        tracing::info!(
            name = %request.name(),
            files_count = request.samples().len(),
            total_bytes = request.total_bytes(),
            "Sending clone request to voice service"
        );

        let body = self.voice_service.create_voice(api_key, &request).await?;

        tracing::info!(
            name = %request.name(),
            voice_id = ?body.get("voice_id"),
            "Voice cloned"
        );

        Ok(body)
    }
}
