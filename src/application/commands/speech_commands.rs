//! Speech Commands

/// 生成语音命令
#[derive(Debug, Clone)]
pub struct GenerateSpeech {
    pub text: Option<String>,
    pub voice_id: Option<String>,
}
