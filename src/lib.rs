//! VoiceClone - 音色克隆与语音合成
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice: 克隆请求、音频样本、voice id
//! - Speech: 合成请求
//!
//! 应用层 (application/):
//! - Ports: VoiceServicePort（外部语音服务）
//! - Commands: CloneVoice / GenerateSpeech 命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 代理 API（/api/clone-voice, /api/text-to-speech）
//! - Adapters: ElevenLabs 客户端
//!
//! 客户端 (client/):
//! - 克隆 → 合成两步流程的状态机与终端前端

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
