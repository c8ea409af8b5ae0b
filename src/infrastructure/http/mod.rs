//! HTTP Layer - 代理 API
//!
//! 校验请求、注入服务端凭证、转发到外部音色服务，并统一错误格式

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::{ApiError, ErrorResponse, Operation};
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
