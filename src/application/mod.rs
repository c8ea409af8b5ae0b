//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 外部音色服务端口
//! - commands: 克隆音色 / 生成语音命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

pub use commands::{
    handlers::{CloneVoiceHandler, GenerateSpeechHandler},
    CloneVoice, GenerateSpeech,
};
pub use error::{ApplicationError, ErrorCategory};
pub use ports::{ApiKey, AudioStream, SynthesizedSpeech, VoiceServiceError, VoiceServicePort};
