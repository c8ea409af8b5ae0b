//! Voice Cloning Screen - 音色克隆界面状态
//!
//! 两个阶段: Editing / Submitting。提交分三步：
//! `begin_submit` 进入 Submitting 并取出请求，`CloneSubmission::send` 发请求，
//! `finish` 回到 Editing 并记录结果。`submit` 把三步串起来

use crate::domain::voice::VoiceId;

use super::api::{AudioFile, ProxyApi};

/// 没有更具体的信息时显示的错误
pub const CLONE_FAILED_MESSAGE: &str = "Voice cloning failed";
/// 响应无法解析时显示的错误
pub const CLONE_RETRY_MESSAGE: &str = "Failed to clone voice. Please try again.";
/// 成功响应中缺少 voice_id 时显示的错误
pub const MISSING_VOICE_ID_MESSAGE: &str = "Voice ID not received from the server";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

/// 一次进行中的克隆请求
#[derive(Debug, Clone)]
pub struct CloneSubmission {
    name: String,
    files: Vec<AudioFile>,
}

impl CloneSubmission {
    /// 发送请求并解释响应
    ///
    /// 错误值即展示给用户的消息
    pub async fn send(self, api: &dyn ProxyApi) -> Result<VoiceId, String> {
        let reply = api
            .clone_voice(&self.name, &self.files)
            .await
            .map_err(|e| e.to_string())?;

        let data = reply.json().map_err(|e| {
            tracing::warn!(status = reply.status, error = %e, "Unreadable clone response");
            CLONE_RETRY_MESSAGE.to_string()
        })?;

        if !reply.is_ok() {
            return Err(failure_message(&data));
        }

        data.get("voice_id")
            .and_then(|v| v.as_str())
            .and_then(|id| VoiceId::new(id).ok())
            .ok_or_else(|| MISSING_VOICE_ID_MESSAGE.to_string())
    }
}

/// 错误消息优先取 `details`，其次 `error`
///
/// 结构化的 details 以紧凑 JSON 显示
fn failure_message(data: &serde_json::Value) -> String {
    use serde_json::Value;

    for key in ["details", "error"] {
        match data.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Null) | Some(Value::String(_)) | None => continue,
            Some(other) => return other.to_string(),
        }
    }
    CLONE_FAILED_MESSAGE.to_string()
}

/// 音色克隆表单
#[derive(Debug, Clone)]
pub struct VoiceCloningForm {
    name: String,
    files: Vec<AudioFile>,
    phase: FormPhase,
    error: Option<String>,
}

impl Default for VoiceCloningForm {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceCloningForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            files: Vec::new(),
            phase: FormPhase::Editing,
            error: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 替换已选文件
    pub fn select_files(&mut self, files: Vec<AudioFile>) {
        self.files = files;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[AudioFile] {
        &self.files
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.files.is_empty() && !self.name.trim().is_empty() && !self.is_submitting()
    }

    /// 进入 Submitting，清除上次的错误
    ///
    /// 不满足提交条件时返回 None，状态不变
    pub fn begin_submit(&mut self) -> Option<CloneSubmission> {
        if !self.can_submit() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        self.error = None;
        Some(CloneSubmission {
            name: self.name.clone(),
            files: self.files.clone(),
        })
    }

    /// 回到 Editing；失败时记录错误，成功时返回 voice id
    pub fn finish(&mut self, outcome: Result<VoiceId, String>) -> Option<VoiceId> {
        self.phase = FormPhase::Editing;
        match outcome {
            Ok(voice_id) => {
                tracing::info!(voice_id = %voice_id, "Voice created");
                Some(voice_id)
            }
            Err(message) => {
                tracing::warn!(error = %message, "Error cloning voice");
                self.error = Some(message);
                None
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn ProxyApi) -> Option<VoiceId> {
        let submission = self.begin_submit()?;
        let outcome = submission.send(api).await;
        self.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::ClientError;
    use crate::client::testing::{json_reply, MockProxyApi};
    use bytes::Bytes;
    use serde_json::json;

    fn ready_form() -> VoiceCloningForm {
        let mut form = VoiceCloningForm::new();
        form.set_name("Alice");
        form.select_files(vec![AudioFile::new("me.mp3", Bytes::from_static(b"ID3"))]);
        form
    }

    #[test]
    fn test_submit_disabled_until_name_and_files() {
        let mut form = VoiceCloningForm::new();
        assert!(!form.can_submit());

        form.set_name("Alice");
        assert!(!form.can_submit());

        form.select_files(vec![AudioFile::new("me.mp3", Bytes::new())]);
        assert!(form.can_submit());

        form.set_name("");
        assert!(!form.can_submit());

        form.set_name("   ");
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn test_submit_disabled_while_in_flight() {
        let mut form = ready_form();
        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut form = ready_form();
        form.begin_submit();
        form.finish(Err("boom".to_string()));
        assert_eq!(form.error(), Some("boom"));

        form.begin_submit();
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn test_success_returns_voice_id() {
        let api = MockProxyApi::new().on_clone(Ok(json_reply(200, json!({ "voice_id": "v123" }))));
        let mut form = ready_form();

        let voice_id = form.submit(&api).await;

        assert_eq!(voice_id.unwrap().as_str(), "v123");
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(
            api.clone_calls.lock().unwrap()[0],
            ("Alice".to_string(), vec!["me.mp3".to_string()])
        );
    }

    #[tokio::test]
    async fn test_missing_voice_id_is_failure() {
        let api = MockProxyApi::new().on_clone(Ok(json_reply(200, json!({ "name": "Alice" }))));
        let mut form = ready_form();

        assert!(form.submit(&api).await.is_none());
        assert_eq!(form.error(), Some(MISSING_VOICE_ID_MESSAGE));
    }

    #[tokio::test]
    async fn test_server_details_shown_and_retry_enabled() {
        let api = MockProxyApi::new().on_clone(Ok(json_reply(
            400,
            json!({ "error": "bad", "details": "too short" }),
        )));
        let mut form = ready_form();

        assert!(form.submit(&api).await.is_none());
        assert_eq!(form.error(), Some("too short"));
        assert!(!form.is_submitting());
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_error_field_used_without_details() {
        let api = MockProxyApi::new().on_clone(Ok(json_reply(
            500,
            json!({ "error": "Server configuration error" }),
        )));
        let mut form = ready_form();

        form.submit(&api).await;
        assert_eq!(form.error(), Some("Server configuration error"));
    }

    #[tokio::test]
    async fn test_structured_details_rendered_as_json() {
        let api = MockProxyApi::new().on_clone(Ok(json_reply(
            422,
            json!({ "error": "Failed to clone voice", "details": { "status": "voice_too_short" } }),
        )));
        let mut form = ready_form();

        form.submit(&api).await;
        assert_eq!(form.error(), Some(r#"{"status":"voice_too_short"}"#));
    }

    #[tokio::test]
    async fn test_generic_message_without_fields() {
        let api = MockProxyApi::new().on_clone(Ok(json_reply(502, json!({}))));
        let mut form = ready_form();

        form.submit(&api).await;
        assert_eq!(form.error(), Some(CLONE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_unparseable_body() {
        let api = MockProxyApi::new().on_clone(Ok(crate::client::api::ProxyReply {
            status: 502,
            content_type: Some("text/html".to_string()),
            body: Bytes::from_static(b"<html>Bad Gateway</html>"),
        }));
        let mut form = ready_form();

        form.submit(&api).await;
        assert_eq!(form.error(), Some(CLONE_RETRY_MESSAGE));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_form_retryable() {
        let api = MockProxyApi::new()
            .on_clone(Err(ClientError::Transport("connection refused".to_string())));
        let mut form = ready_form();

        assert!(form.submit(&api).await.is_none());
        assert_eq!(
            form.error(),
            Some("Failed to reach the server: connection refused")
        );
        assert!(form.can_submit());
    }
}
