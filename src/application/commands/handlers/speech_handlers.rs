//! Speech Command Handlers

use std::sync::Arc;

use crate::application::commands::GenerateSpeech;
use crate::application::error::ApplicationError;
use crate::application::ports::{ApiKey, SynthesizedSpeech, VoiceServicePort};
use crate::domain::speech::SpeechGenerationRequest;

/// GenerateSpeech Handler
pub struct GenerateSpeechHandler {
    voice_service: Arc<dyn VoiceServicePort>,
    api_key: Option<ApiKey>,
}

impl GenerateSpeechHandler {
    pub fn new(voice_service: Arc<dyn VoiceServicePort>, api_key: Option<ApiKey>) -> Self {
        Self {
            voice_service,
            api_key,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateSpeech,
    ) -> Result<SynthesizedSpeech, ApplicationError> {
        let request = SpeechGenerationRequest::new(command.text, command.voice_id)?;

        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ApplicationError::ConfigurationError("voice service API key is not set".to_string())
        })?;

        tracing::info!(
            voice_id = %request.voice_id(),
            text_chars = request.text().char_count(),
            "Sending speech request to voice service"
        );

        let speech = self.voice_service.synthesize(api_key, &request).await?;

        tracing::debug!(
            voice_id = %request.voice_id(),
            content_type = %speech.content_type,
            "Speech stream started"
        );

        Ok(speech)
    }
}
