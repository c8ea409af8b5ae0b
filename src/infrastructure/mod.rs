//! 基础设施层
//!
//! - http: 代理 API（axum）
//! - adapters: 外部音色服务客户端

pub mod adapters;
pub mod http;
