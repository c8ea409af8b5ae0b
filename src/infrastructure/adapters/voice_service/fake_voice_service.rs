//! Fake Voice Service - 用于测试的音色服务
//!
//! 不发起任何网络请求，按配置返回固定结果并记录调用

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{
    ApiKey, SynthesizedSpeech, VoiceServiceError, VoiceServicePort,
};
use crate::domain::speech::SpeechGenerationRequest;
use crate::domain::voice::VoiceCreationRequest;

/// 预设的失败方式
#[derive(Debug, Clone)]
pub enum FakeFailure {
    /// 外部服务返回错误状态码
    Upstream {
        status: u16,
        detail: serde_json::Value,
    },
    /// 外部服务无响应
    NoResponse,
    /// 本地构建请求失败
    Request,
}

impl FakeFailure {
    fn to_error(&self) -> VoiceServiceError {
        match self {
            Self::Upstream { status, detail } => VoiceServiceError::Upstream {
                status: *status,
                detail: detail.clone(),
            },
            Self::NoResponse => VoiceServiceError::NoResponse("connection refused".to_string()),
            Self::Request => VoiceServiceError::Request("simulated builder failure".to_string()),
        }
    }
}

/// 记录的 create_voice 调用
#[derive(Debug, Clone)]
pub struct RecordedCreate {
    pub api_key: String,
    pub name: String,
    pub file_names: Vec<String>,
}

/// Fake Voice Service
pub struct FakeVoiceService {
    voice_id: String,
    failure: Option<FakeFailure>,
    create_calls: AtomicUsize,
    synthesize_calls: AtomicUsize,
    last_create: Mutex<Option<RecordedCreate>>,
}

impl FakeVoiceService {
    /// 合成成功时返回的音频
    pub const DEFAULT_AUDIO: &'static [u8] = b"ID3\x04fake-mpeg-frames";

    /// 创建总是成功的服务，克隆结果为给定 voice id
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            failure: None,
            create_calls: AtomicUsize::new(0),
            synthesize_calls: AtomicUsize::new(0),
            last_create: Mutex::new(None),
        }
    }

    /// 创建总是失败的服务
    pub fn failing(failure: FakeFailure) -> Self {
        let mut service = Self::new("unused");
        service.failure = Some(failure);
        service
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn synthesize_calls(&self) -> usize {
        self.synthesize_calls.load(Ordering::SeqCst)
    }

    pub fn last_create(&self) -> Option<RecordedCreate> {
        self.last_create
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl VoiceServicePort for FakeVoiceService {
    async fn create_voice(
        &self,
        api_key: &ApiKey,
        request: &VoiceCreationRequest,
    ) -> Result<serde_json::Value, VoiceServiceError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_create.lock() {
            *last = Some(RecordedCreate {
                api_key: api_key.expose().to_string(),
                name: request.name().as_str().to_string(),
                file_names: request
                    .samples()
                    .iter()
                    .map(|s| s.file_name().to_string())
                    .collect(),
            });
        }

        tracing::debug!(name = %request.name(), "FakeVoiceService: create_voice");

        match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(serde_json::json!({ "voice_id": self.voice_id })),
        }
    }

    async fn synthesize(
        &self,
        _api_key: &ApiKey,
        request: &SpeechGenerationRequest,
    ) -> Result<SynthesizedSpeech, VoiceServiceError> {
        self.synthesize_calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(voice_id = %request.voice_id(), "FakeVoiceService: synthesize");

        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }

        // 分两块返回，模拟上游分块传输
        let (head, tail) = Self::DEFAULT_AUDIO.split_at(4);
        let chunks = vec![
            Ok(Bytes::from_static(head)),
            Ok(Bytes::from_static(tail)),
        ];

        Ok(SynthesizedSpeech {
            content_type: "audio/mpeg".to_string(),
            audio: Box::pin(futures_util::stream::iter(chunks)),
        })
    }
}
