//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. `ELEVENLABS_API_KEY` / `PORT` 环境变量
//! 2. `VOICECLONE_` 前缀环境变量
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File, Map};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 外部服务密钥的约定环境变量
const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// 监听端口的约定环境变量
const PORT_ENV: &str = "PORT";

/// 加载应用配置
///
/// # 环境变量示例
/// - `ELEVENLABS_API_KEY=sk_...`
/// - `PORT=8080`
/// - `VOICECLONE_SERVER__HOST=127.0.0.1`
/// - `VOICECLONE_VOICE_SERVICE__TIMEOUT_SECS=60`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let env: Map<String, String> = std::env::vars().collect();
    load_config_with_env(config_path, &env)
}

/// 使用给定的环境变量快照加载配置
fn load_config_with_env(
    config_path: Option<&Path>,
    env: &Map<String, String>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3001)?
        .set_default("server.max_upload_size", 50 * 1024 * 1024)?
        .set_default("voice_service.base_url", "https://api.elevenlabs.io")?
        .set_default("voice_service.model_id", "eleven_multilingual_v2")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 前缀环境变量
    // 例如: VOICECLONE_VOICE_SERVICE__BASE_URL=http://localhost:9000
    builder = builder.add_source(
        Environment::with_prefix("VOICECLONE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(env.clone())),
    );

    // 4. 约定环境变量（最高优先级）
    let api_key = env
        .get(API_KEY_ENV)
        .filter(|key| !key.trim().is_empty())
        .cloned();
    let port = env
        .get(PORT_ENV)
        .map(|raw| {
            raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::ParseError(format!("Invalid {} value {:?}: {}", PORT_ENV, raw, e))
            })
        })
        .transpose()?;

    builder = builder
        .set_override_option("voice_service.api_key", api_key)?
        .set_override_option("server.port", port.map(i64::from))?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.voice_service.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice service base URL cannot be empty".to_string(),
        ));
    }

    if config.voice_service.model_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice service model id cannot be empty".to_string(),
        ));
    }

    if config.voice_service.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "Voice service timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 只报告密钥是否设置，不输出内容
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Max Upload Size: {} bytes", config.server.max_upload_size);
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Voice Service URL: {}", config.voice_service.base_url);
    tracing::info!("Voice Service Model: {}", config.voice_service.model_id);
    match config.voice_service.timeout_secs {
        Some(secs) => tracing::info!("Voice Service Timeout: {}s", secs),
        None => tracing::info!("Voice Service Timeout: none"),
    }
    tracing::info!(
        "{}: {}",
        API_KEY_ENV,
        if config.voice_service.has_api_key() { "Set" } else { "Not set" }
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let file = write_config("");
        let config = load_config_with_env(Some(file.path()), &env(&[])).unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.voice_service.api_key, None);
        assert_eq!(config.voice_service.model_id, "eleven_multilingual_v2");
    }

    #[test]
    fn test_file_values_are_loaded() {
        let file = write_config(
            r#"
[server]
port = 4000

[voice_service]
base_url = "http://localhost:9000"
timeout_secs = 30
"#,
        );
        let config = load_config_with_env(Some(file.path()), &env(&[])).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.voice_service.base_url, "http://localhost:9000");
        assert_eq!(config.voice_service.timeout_secs, Some(30));
    }

    #[test]
    fn test_conventional_env_overrides_file() {
        let file = write_config("[server]\nport = 4000\n");
        let config = load_config_with_env(
            Some(file.path()),
            &env(&[("PORT", "8080"), ("ELEVENLABS_API_KEY", "sk_env")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.voice_service.api_key.as_deref(), Some("sk_env"));
    }

    #[test]
    fn test_blank_api_key_env_is_ignored() {
        let file = write_config("");
        let config =
            load_config_with_env(Some(file.path()), &env(&[("ELEVENLABS_API_KEY", "")])).unwrap();
        assert!(!config.voice_service.has_api_key());
    }

    #[test]
    fn test_invalid_port_env_rejected() {
        let file = write_config("");
        let result = load_config_with_env(Some(file.path()), &env(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_prefixed_env_is_loaded() {
        let file = write_config("");
        let config = load_config_with_env(
            Some(file.path()),
            &env(&[("VOICECLONE_LOG__LEVEL", "debug")]),
        )
        .unwrap();
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_base_url() {
        let mut config = AppConfig::default();
        config.voice_service.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.voice_service.timeout_secs = Some(0);
        assert!(validate_config(&config).is_err());
    }
}
