//! Client - 两步流程的客户端状态
//!
//! 克隆界面、合成界面与根流程都是显式状态机，
//! 终端前端和播放器只是它们的一种呈现

pub mod api;
pub mod audio;
pub mod error;
pub mod object_url;
pub mod player;
pub mod terminal;
pub mod text_to_speech;
pub mod view;
pub mod voice_cloning;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{AudioFile, HttpProxyApi, ProxyApi, ProxyReply};
pub use audio::AudioElement;
pub use error::{ClientError, PlaybackError};
pub use object_url::{AudioBlob, ObjectUrl, ObjectUrlStore};
pub use player::ExternalPlayer;
pub use terminal::{CommandError, TerminalApp, TerminalCommand};
pub use text_to_speech::TextToSpeechPanel;
pub use voice_cloning::{FormPhase, VoiceCloningForm};
pub use workflow::{Step, Workflow};
