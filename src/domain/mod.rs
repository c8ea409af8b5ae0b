//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色创建请求与音色标识
//! - Speech Context: 语音合成请求

pub mod speech;
pub mod voice;
