//! VoiceClone - 音色克隆代理服务
//!
//! 接收音频样本转发给 ElevenLabs 创建克隆音色，
//! 再用该音色把文本合成为语音

use std::sync::Arc;

use voiceclone::config::{load_config, print_config, AppConfig};
use voiceclone::infrastructure::adapters::{ElevenLabsClient, ElevenLabsClientConfig};
use voiceclone::infrastructure::http::{AppState, HttpServer};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},voiceclone={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 中的 ELEVENLABS_API_KEY / PORT
    let _ = dotenvy::dotenv();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("VoiceClone proxy server");
    print_config(&config);

    if !config.voice_service.has_api_key() {
        tracing::warn!("ELEVENLABS_API_KEY is not set, voice requests will fail");
    }

    let mut client_config = ElevenLabsClientConfig::new(&config.voice_service.base_url)
        .with_model(&config.voice_service.model_id);
    if let Some(secs) = config.voice_service.timeout_secs {
        client_config = client_config.with_timeout(secs);
    }
    let voice_service = Arc::new(ElevenLabsClient::new(client_config)?);

    let state = AppState::new(&config.voice_service, voice_service);
    let server = HttpServer::new((&config.server).into(), state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
