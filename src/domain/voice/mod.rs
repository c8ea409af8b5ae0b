//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色创建请求（名称 + 音频样本）的校验
//! - 外部服务返回的音色标识

mod errors;
mod request;
mod value_objects;

pub use errors::VoiceError;
pub use request::VoiceCreationRequest;
pub use value_objects::{AudioSample, VoiceId, VoiceName};
