//! Client Errors

use thiserror::Error;

/// 客户端错误
#[derive(Debug, Error)]
pub enum ClientError {
    /// 请求未能到达代理服务或没有收到响应
    #[error("Failed to reach the server: {0}")]
    Transport(String),

    /// 读取本地音频文件失败
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// 代理服务地址无效
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

/// 播放错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("no audio loaded")]
    NoSource,

    #[error("audio reference was revoked: {0}")]
    SourceRevoked(String),

    #[error("player failed: {0}")]
    Player(String),
}
