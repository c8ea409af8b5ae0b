//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("voice name is required")]
    MissingName,

    #[error("at least one audio file is required")]
    NoAudioFiles,

    #[error("voiceId is required")]
    MissingVoiceId,

    #[error("text is required")]
    MissingText,
}
