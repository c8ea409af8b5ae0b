//! Workflow - 克隆 → 合成两步流程
//!
//! 只有克隆成功才会进入合成步骤，且不可返回

use std::sync::Arc;

use crate::domain::voice::VoiceId;

use super::api::ProxyApi;
use super::audio::AudioElement;
use super::object_url::{AudioBlob, ObjectUrlStore};
use super::text_to_speech::{SpeechSubmission, TextToSpeechPanel};
use super::voice_cloning::{CloneSubmission, VoiceCloningForm};

/// 当前步骤
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Cloning,
    Generating { voice_id: VoiceId },
}

pub struct Workflow<A: AudioElement> {
    api: Arc<dyn ProxyApi>,
    store: ObjectUrlStore,
    form: VoiceCloningForm,
    speech: Option<TextToSpeechPanel<A>>,
    element: Option<A>,
}

impl<A: AudioElement> Workflow<A> {
    pub fn new(api: Arc<dyn ProxyApi>, store: ObjectUrlStore, element: A) -> Self {
        Self {
            api,
            store,
            form: VoiceCloningForm::new(),
            speech: None,
            element: Some(element),
        }
    }

    pub fn api(&self) -> Arc<dyn ProxyApi> {
        Arc::clone(&self.api)
    }

    pub fn store(&self) -> &ObjectUrlStore {
        &self.store
    }

    pub fn step(&self) -> Step {
        match &self.speech {
            Some(panel) => Step::Generating {
                voice_id: panel.voice_id().clone(),
            },
            None => Step::Cloning,
        }
    }

    pub fn form(&self) -> &VoiceCloningForm {
        &self.form
    }

    /// 进入合成步骤后返回 None
    pub fn form_mut(&mut self) -> Option<&mut VoiceCloningForm> {
        match self.speech {
            Some(_) => None,
            None => Some(&mut self.form),
        }
    }

    pub fn speech(&self) -> Option<&TextToSpeechPanel<A>> {
        self.speech.as_ref()
    }

    pub fn speech_mut(&mut self) -> Option<&mut TextToSpeechPanel<A>> {
        self.speech.as_mut()
    }

    pub fn begin_clone(&mut self) -> Option<CloneSubmission> {
        self.form_mut()?.begin_submit()
    }

    pub fn finish_clone(&mut self, outcome: Result<VoiceId, String>) -> Option<VoiceId> {
        if self.speech.is_some() {
            return None;
        }
        let voice_id = self.form.finish(outcome)?;
        self.voice_created(voice_id.clone());
        Some(voice_id)
    }

    /// 提交克隆表单，成功后进入合成步骤
    pub async fn submit_clone(&mut self) -> Option<VoiceId> {
        let submission = self.begin_clone()?;
        let outcome = submission.send(self.api.as_ref()).await;
        self.finish_clone(outcome)
    }

    fn voice_created(&mut self, voice_id: VoiceId) {
        let Some(element) = self.element.take() else {
            return;
        };
        tracing::info!(voice_id = %voice_id, "Switching to speech generation");
        self.speech = Some(TextToSpeechPanel::new(voice_id, self.store.clone(), element));
    }

    pub fn begin_speech(&mut self) -> Option<SpeechSubmission> {
        self.speech.as_mut()?.begin_generate()
    }

    pub fn finish_speech(&mut self, outcome: Result<AudioBlob, String>) -> bool {
        match self.speech.as_mut() {
            Some(panel) => panel.finish(outcome),
            None => false,
        }
    }

    /// 合成语音；仍在克隆步骤时返回 false
    pub async fn submit_speech(&mut self) -> bool {
        let Some(submission) = self.begin_speech() else {
            return false;
        };
        let outcome = submission.send(self.api.as_ref()).await;
        self.finish_speech(outcome)
    }
}
