//! 应用层 - 命令
//!
//! 每个命令对应一次对外部音色服务的调用

mod speech_commands;
mod voice_commands;

pub mod handlers;

pub use speech_commands::*;
pub use voice_commands::*;
