//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod voice_service;

pub use voice_service::*;
