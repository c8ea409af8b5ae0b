//! Voice Service Adapter - 外部音色服务客户端实现

mod elevenlabs_client;
mod fake_voice_service;

pub use elevenlabs_client::*;
pub use fake_voice_service::{FakeFailure, FakeVoiceService, RecordedCreate};
