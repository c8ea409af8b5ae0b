//! Voice Commands

use crate::domain::voice::AudioSample;

/// 克隆音色命令
///
/// 字段保持为原始输入，校验在 handler 中完成
#[derive(Debug, Clone)]
pub struct CloneVoice {
    pub name: Option<String>,
    pub samples: Vec<AudioSample>,
}
