//! Application State
//!
//! 所有请求共享的只读状态

use std::sync::Arc;

use crate::application::{ApiKey, CloneVoiceHandler, GenerateSpeechHandler, VoiceServicePort};
use crate::config::VoiceServiceConfig;

/// 应用状态
///
/// 请求之间不共享任何可变数据
pub struct AppState {
    pub voice_service_configured: bool,

    pub clone_voice_handler: CloneVoiceHandler,
    pub generate_speech_handler: GenerateSpeechHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// 凭证在这里从配置中取出一次，之后只通过 handler 使用
    pub fn new(config: &VoiceServiceConfig, voice_service: Arc<dyn VoiceServicePort>) -> Self {
        let api_key = config.api_key.clone().and_then(ApiKey::new);

        Self {
            voice_service_configured: api_key.is_some(),
            clone_voice_handler: CloneVoiceHandler::new(voice_service.clone(), api_key.clone()),
            generate_speech_handler: GenerateSpeechHandler::new(voice_service, api_key),
        }
    }
}
