//! Object URL Store
//!
//! 合成音频只保存在内存中，通过可撤销的 object URL 引用。
//! 撤销后引用失效，内存随之释放

use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 内存音频数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBlob {
    pub content_type: String,
    pub data: Bytes,
}

impl AudioBlob {
    pub fn new(content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            content_type: content_type.into(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 指向 store 中一段音频的引用
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    fn generate() -> Self {
        Self(format!("blob:voiceclone/{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 会话内的 object URL 注册表
///
/// clone 共享同一份数据，生成界面和播放器各持有一份
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlStore {
    blobs: Arc<DashMap<ObjectUrl, AudioBlob>>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册音频，返回新的引用
    pub fn create(&self, blob: AudioBlob) -> ObjectUrl {
        let url = ObjectUrl::generate();
        tracing::debug!(url = %url, size = blob.len(), "Object URL created");
        self.blobs.insert(url.clone(), blob);
        url
    }

    pub fn get(&self, url: &ObjectUrl) -> Option<AudioBlob> {
        self.blobs.get(url).map(|entry| entry.value().clone())
    }

    /// 撤销引用，返回引用此前是否有效
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        let removed = self.blobs.remove(url).is_some();
        if removed {
            tracing::debug!(url = %url, "Object URL revoked");
        }
        removed
    }

    pub fn contains(&self, url: &ObjectUrl) -> bool {
        self.blobs.contains_key(url)
    }

    /// 当前有效引用数
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_revoke() {
        let store = ObjectUrlStore::new();
        let url = store.create(AudioBlob::new("audio/mpeg", Bytes::from_static(b"ID3")));

        assert!(url.as_str().starts_with("blob:voiceclone/"));
        assert_eq!(store.get(&url).unwrap().data, Bytes::from_static(b"ID3"));
        assert_eq!(store.len(), 1);

        assert!(store.revoke(&url));
        assert!(store.get(&url).is_none());
        assert!(!store.revoke(&url));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = ObjectUrlStore::new();
        let shared = store.clone();
        let url = store.create(AudioBlob::new("audio/mpeg", Bytes::from_static(b"x")));

        assert!(shared.contains(&url));
        shared.revoke(&url);
        assert!(!store.contains(&url));
    }

    #[test]
    fn test_urls_are_unique() {
        let store = ObjectUrlStore::new();
        let a = store.create(AudioBlob::new("audio/mpeg", Bytes::new()));
        let b = store.create(AudioBlob::new("audio/mpeg", Bytes::new()));
        assert_ne!(a, b);
    }
}
