//! 客户端测试替身

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::api::{AudioFile, ProxyApi, ProxyReply};
use super::audio::AudioElement;
use super::error::{ClientError, PlaybackError};
use super::object_url::ObjectUrl;

pub(crate) fn json_reply(status: u16, body: serde_json::Value) -> ProxyReply {
    ProxyReply {
        status,
        content_type: Some("application/json".to_string()),
        body: Bytes::from(body.to_string()),
    }
}

pub(crate) fn audio_reply(data: &'static [u8]) -> ProxyReply {
    ProxyReply {
        status: 200,
        content_type: Some("audio/mpeg".to_string()),
        body: Bytes::from_static(data),
    }
}

/// 按顺序返回预设响应的代理 API
#[derive(Default)]
pub(crate) struct MockProxyApi {
    clone_replies: Mutex<VecDeque<Result<ProxyReply, ClientError>>>,
    speech_replies: Mutex<VecDeque<Result<ProxyReply, ClientError>>>,
    pub clone_calls: Mutex<Vec<(String, Vec<String>)>>,
    pub speech_calls: Mutex<Vec<(String, String)>>,
}

impl MockProxyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_clone(self, reply: Result<ProxyReply, ClientError>) -> Self {
        self.clone_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_speech(self, reply: Result<ProxyReply, ClientError>) -> Self {
        self.speech_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn clone_call_count(&self) -> usize {
        self.clone_calls.lock().unwrap().len()
    }

    pub fn speech_call_count(&self) -> usize {
        self.speech_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ProxyApi for MockProxyApi {
    async fn clone_voice(&self, name: &str, files: &[AudioFile]) -> Result<ProxyReply, ClientError> {
        self.clone_calls.lock().unwrap().push((
            name.to_string(),
            files.iter().map(|f| f.file_name.clone()).collect(),
        ));
        self.clone_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected clone_voice call")
    }

    async fn text_to_speech(&self, text: &str, voice_id: &str) -> Result<ProxyReply, ClientError> {
        self.speech_calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice_id.to_string()));
        self.speech_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected text_to_speech call")
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeElementState {
    pub source: Option<ObjectUrl>,
    pub paused: bool,
    pub position: f64,
    pub ended_pending: bool,
    pub refuse_play: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
}

/// 记录所有指令的播放元素，clone 共享同一状态
#[derive(Debug, Clone)]
pub(crate) struct FakeAudioElement {
    pub state: Arc<Mutex<FakeElementState>>,
}

impl FakeAudioElement {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeElementState {
                paused: true,
                ..Default::default()
            })),
        }
    }

    /// 模拟自然播放结束
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap();
        state.paused = true;
        state.ended_pending = true;
    }

    /// 模拟播放进度
    pub fn advance(&self, seconds: f64) {
        self.state.lock().unwrap().position += seconds;
    }

    pub fn snapshot(&self) -> (Option<ObjectUrl>, bool, f64) {
        let state = self.state.lock().unwrap();
        (state.source.clone(), state.paused, state.position)
    }
}

impl AudioElement for FakeAudioElement {
    fn load(&mut self, url: &ObjectUrl) {
        let mut state = self.state.lock().unwrap();
        state.source = Some(url.clone());
        state.paused = true;
        state.position = 0.0;
        state.ended_pending = false;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut state = self.state.lock().unwrap();
        state.play_calls += 1;
        if state.source.is_none() {
            return Err(PlaybackError::NoSource);
        }
        if state.refuse_play {
            return Err(PlaybackError::Player("autoplay blocked".to_string()));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.pause_calls += 1;
        state.paused = true;
    }

    fn paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    fn current_time(&self) -> f64 {
        self.state.lock().unwrap().position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.state.lock().unwrap().position = seconds;
    }

    fn take_ended(&mut self) -> bool {
        std::mem::take(&mut self.state.lock().unwrap().ended_pending)
    }
}
