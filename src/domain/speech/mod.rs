//! Speech Context - 语音合成请求

use crate::domain::voice::{VoiceError, VoiceId};

/// 待合成文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechText(String);

impl SpeechText {
    pub fn new(text: impl Into<String>) -> Result<Self, VoiceError> {
        let text = text.into();
        if text.is_empty() {
            return Err(VoiceError::MissingText);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 字符数（用于日志）
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// 语音合成请求
///
/// 本地只校验非空，voice id 是否有效由外部服务判定
#[derive(Debug, Clone)]
pub struct SpeechGenerationRequest {
    text: SpeechText,
    voice_id: VoiceId,
}

impl SpeechGenerationRequest {
    /// text 缺失优先于 voiceId 缺失报告
    pub fn new(text: Option<String>, voice_id: Option<String>) -> Result<Self, VoiceError> {
        let text = SpeechText::new(text.unwrap_or_default())?;
        let voice_id = VoiceId::new(voice_id.unwrap_or_default())?;
        Ok(Self { text, voice_id })
    }

    pub fn text(&self) -> &SpeechText {
        &self.text
    }

    pub fn voice_id(&self) -> &VoiceId {
        &self.voice_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request =
            SpeechGenerationRequest::new(Some("你好".to_string()), Some("v123".to_string()))
                .unwrap();
        assert_eq!(request.text().as_str(), "你好");
        assert_eq!(request.text().char_count(), 2);
        assert_eq!(request.voice_id().as_str(), "v123");
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = SpeechGenerationRequest::new(Some(String::new()), Some("v123".to_string()))
            .unwrap_err();
        assert!(matches!(err, VoiceError::MissingText));
    }

    #[test]
    fn test_missing_voice_id_rejected() {
        let err = SpeechGenerationRequest::new(Some("hello".to_string()), None).unwrap_err();
        assert!(matches!(err, VoiceError::MissingVoiceId));
    }
}
