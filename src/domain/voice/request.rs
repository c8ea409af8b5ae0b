//! Voice Context - 音色创建请求

use super::{AudioSample, VoiceError, VoiceName};

/// 音色创建请求
///
/// 不变量:
/// - name 非空
/// - 至少包含一个音频样本，顺序与上传顺序一致
#[derive(Debug, Clone)]
pub struct VoiceCreationRequest {
    name: VoiceName,
    samples: Vec<AudioSample>,
}

impl VoiceCreationRequest {
    /// 校验并创建请求
    ///
    /// name 缺失优先于样本缺失报告
    pub fn new(name: Option<String>, samples: Vec<AudioSample>) -> Result<Self, VoiceError> {
        let name = VoiceName::new(name.unwrap_or_default())?;
        if samples.is_empty() {
            return Err(VoiceError::NoAudioFiles);
        }
        Ok(Self { name, samples })
    }

    pub fn name(&self) -> &VoiceName {
        &self.name
    }

    pub fn samples(&self) -> &[AudioSample] {
        &self.samples
    }

    pub fn total_bytes(&self) -> usize {
        self.samples.iter().map(AudioSample::len).sum()
    }
}
