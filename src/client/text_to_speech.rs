//! Speech Generation Screen - 语音合成界面状态
//!
//! 合成的音频注册到 ObjectUrlStore，由 AudioElement 播放。
//! 新音频到达时撤销旧引用，界面销毁时撤销当前引用

use crate::domain::voice::VoiceId;

use super::api::ProxyApi;
use super::audio::AudioElement;
use super::error::PlaybackError;
use super::object_url::{AudioBlob, ObjectUrl, ObjectUrlStore};

/// 合成失败时的提示
pub const GENERATE_FAILED_ALERT: &str = "Failed to generate speech. Please try again.";

const DEFAULT_AUDIO_TYPE: &str = "audio/mpeg";

/// 一次进行中的合成请求
#[derive(Debug, Clone)]
pub struct SpeechSubmission {
    text: String,
    voice_id: VoiceId,
}

impl SpeechSubmission {
    pub async fn send(self, api: &dyn ProxyApi) -> Result<AudioBlob, String> {
        let reply = match api.text_to_speech(&self.text, self.voice_id.as_str()).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Error generating speech");
                return Err(GENERATE_FAILED_ALERT.to_string());
            }
        };

        if !reply.is_ok() {
            tracing::warn!(
                status = reply.status,
                body = %String::from_utf8_lossy(&reply.body),
                "Speech generation rejected"
            );
            return Err(GENERATE_FAILED_ALERT.to_string());
        }

        let content_type = reply
            .content_type
            .unwrap_or_else(|| DEFAULT_AUDIO_TYPE.to_string());
        Ok(AudioBlob::new(content_type, reply.body))
    }
}

/// 语音合成界面
pub struct TextToSpeechPanel<A: AudioElement> {
    voice_id: VoiceId,
    text: String,
    generating: bool,
    audio_url: Option<ObjectUrl>,
    playing: bool,
    alert: Option<String>,
    store: ObjectUrlStore,
    element: A,
}

impl<A: AudioElement> TextToSpeechPanel<A> {
    pub fn new(voice_id: VoiceId, store: ObjectUrlStore, element: A) -> Self {
        Self {
            voice_id,
            text: String::new(),
            generating: false,
            audio_url: None,
            playing: false,
            alert: None,
            store,
            element,
        }
    }

    pub fn voice_id(&self) -> &VoiceId {
        &self.voice_id
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn audio_url(&self) -> Option<&ObjectUrl> {
        self.audio_url.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// 取走提示，每条只显示一次
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn element(&self) -> &A {
        &self.element
    }

    pub fn can_submit(&self) -> bool {
        !self.text.is_empty() && !self.generating
    }

    pub fn begin_generate(&mut self) -> Option<SpeechSubmission> {
        if !self.can_submit() {
            return None;
        }
        self.generating = true;
        self.alert = None;
        Some(SpeechSubmission {
            text: self.text.clone(),
            voice_id: self.voice_id.clone(),
        })
    }

    /// 结束合成；成功时切换到新音频，失败时保留原音频
    pub fn finish(&mut self, outcome: Result<AudioBlob, String>) -> bool {
        self.generating = false;
        match outcome {
            Ok(blob) => {
                let url = self.store.create(blob);
                if let Some(previous) = self.audio_url.replace(url.clone()) {
                    self.store.revoke(&previous);
                }
                self.element.load(&url);
                self.playing = false;
                tracing::info!(url = %url, "Speech ready");
                true
            }
            Err(message) => {
                self.alert = Some(message);
                false
            }
        }
    }

    pub async fn generate(&mut self, api: &dyn ProxyApi) -> bool {
        let Some(submission) = self.begin_generate() else {
            return false;
        };
        let outcome = submission.send(api).await;
        self.finish(outcome)
    }

    /// 播放/暂停切换，没有音频时不做任何事
    pub fn toggle_play_pause(&mut self) -> Result<(), PlaybackError> {
        if self.audio_url.is_none() {
            return Ok(());
        }

        if self.playing {
            self.element.pause();
            self.playing = false;
            return Ok(());
        }

        match self.element.play() {
            Ok(()) => {
                self.playing = true;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Playback refused");
                self.playing = false;
                Err(e)
            }
        }
    }

    /// 回到开头并暂停
    pub fn reset(&mut self) {
        if self.audio_url.is_none() {
            return;
        }
        self.element.set_current_time(0.0);
        self.element.pause();
        self.playing = false;
    }

    pub fn on_ended(&mut self) {
        self.playing = false;
    }

    /// 检查元素是否已自然播放结束
    pub fn poll_playback(&mut self) {
        if self.element.take_ended() {
            self.on_ended();
        }
    }
}

impl<A: AudioElement> Drop for TextToSpeechPanel<A> {
    fn drop(&mut self) {
        if let Some(url) = self.audio_url.take() {
            self.element.pause();
            self.store.revoke(&url);
        }
    }
}
