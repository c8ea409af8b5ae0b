//! External Player - 通过外部命令播放音频
//!
//! 音频字节经 stdin 交给播放器进程，不落盘。
//! 外部进程无法定位：暂停即结束进程，再次播放从头开始

use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

use super::audio::AudioElement;
use super::error::PlaybackError;
use super::object_url::{ObjectUrl, ObjectUrlStore};

pub struct ExternalPlayer {
    program: String,
    args: Vec<String>,
    store: ObjectUrlStore,
    source: Option<ObjectUrl>,
    child: Option<Child>,
    started_at: Option<Instant>,
}

impl ExternalPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>, store: ObjectUrlStore) -> Self {
        Self {
            program: program.into(),
            args,
            store,
            source: None,
            child: None,
            started_at: None,
        }
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                tracing::debug!(error = %e, "Player already exited");
            }
        }
        self.started_at = None;
    }
}

impl AudioElement for ExternalPlayer {
    fn load(&mut self, url: &ObjectUrl) {
        self.stop();
        self.source = Some(url.clone());
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.child.is_some() {
            return Ok(());
        }

        let url = self.source.as_ref().ok_or(PlaybackError::NoSource)?;
        let blob = self
            .store
            .get(url)
            .ok_or_else(|| PlaybackError::SourceRevoked(url.to_string()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaybackError::Player(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            let data = blob.data;
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(&data).await {
                    tracing::debug!(error = %e, "Player closed its input early");
                }
            });
        }

        tracing::debug!(program = %self.program, url = %url, "Player started");
        self.child = Some(child);
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        self.stop();
    }

    fn paused(&self) -> bool {
        self.child.is_none()
    }

    fn current_time(&self) -> f64 {
        self.started_at
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// 只能回到开头
    fn set_current_time(&mut self, seconds: f64) {
        if seconds <= 0.0 && self.child.is_some() {
            self.stop();
        }
    }

    fn take_ended(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => false,
            Ok(Some(status)) => {
                tracing::debug!(%status, "Player finished");
                self.child = None;
                self.started_at = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Lost track of player process");
                self.child = None;
                self.started_at = None;
                true
            }
        }
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::client::object_url::AudioBlob;
    use bytes::Bytes;
    use std::time::Duration;

    fn loaded_player(program: &str) -> (ExternalPlayer, ObjectUrlStore, ObjectUrl) {
        let store = ObjectUrlStore::new();
        let url = store.create(AudioBlob::new("audio/mpeg", Bytes::from_static(b"ID3frames")));
        let mut player = ExternalPlayer::new(program, Vec::new(), store.clone());
        player.load(&url);
        (player, store, url)
    }

    #[tokio::test]
    async fn test_play_until_ended() {
        let (mut player, _, _) = loaded_player("cat");
        assert!(player.paused());

        player.play().unwrap();
        assert!(!player.paused());

        let mut ended = false;
        for _ in 0..100 {
            if player.take_ended() {
                ended = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(ended);
        assert!(player.paused());
        assert!(!player.take_ended());
    }

    #[tokio::test]
    async fn test_pause_stops_process() {
        let (mut player, _, _) = loaded_player("sleep");
        player.args = vec!["5".to_string()];

        player.play().unwrap();
        player.pause();
        assert!(player.paused());
        assert_eq!(player.current_time(), 0.0);
        assert!(!player.take_ended());
    }

    #[tokio::test]
    async fn test_play_without_source() {
        let mut player = ExternalPlayer::new("cat", Vec::new(), ObjectUrlStore::new());
        assert_eq!(player.play(), Err(PlaybackError::NoSource));
    }

    #[tokio::test]
    async fn test_play_revoked_source() {
        let (mut player, store, url) = loaded_player("cat");
        store.revoke(&url);

        assert!(matches!(player.play(), Err(PlaybackError::SourceRevoked(_))));
        assert!(player.paused());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let (mut player, _, _) = loaded_player("voiceclone-no-such-player");
        assert!(matches!(player.play(), Err(PlaybackError::Player(_))));
    }
}
