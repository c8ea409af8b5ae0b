//! 路由测试辅助函数

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use std::sync::Arc;

use crate::config::VoiceServiceConfig;
use crate::infrastructure::adapters::FakeVoiceService;
use crate::infrastructure::http::{AppState, HttpServer, ServerConfig};

pub(crate) const BOUNDARY: &str = "voiceclone-test-boundary";

/// 用 FakeVoiceService 构建完整路由
pub(crate) fn router(service: Arc<FakeVoiceService>, api_key: Option<&str>) -> Router {
    let config = VoiceServiceConfig {
        api_key: api_key.map(str::to_string),
        ..Default::default()
    };
    let state = AppState::new(&config, service);
    HttpServer::new(ServerConfig::default(), state).build_router()
}

/// 构造 multipart 请求体
pub(crate) fn multipart_body(name: Option<&str>, files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(name) = name {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{}\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
    }

    for (file_name, data) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: audio/mpeg\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub(crate) fn clone_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/clone-voice")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub(crate) async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
