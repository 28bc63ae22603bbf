//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
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

/// 环境变量前缀
const ENV_PREFIX: &str = "NOVELVERSE";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NOVELVERSE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NOVELVERSE_SERVER__PORT=8080`
/// - `NOVELVERSE_REMOTE__URL=https://xyz.supabase.co`
/// - `NOVELVERSE_REMOTE__KEY=...`
/// - `NOVELVERSE_MOCK__LATENCY_SCALE=0`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("server.max_upload_size", 20 * 1024 * 1024)?
        .set_default("remote.timeout_secs", 30)?
        .set_default("mock.latency_scale", 1.0)?
        .set_default("extractor.timeout_secs", 60)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: NOVELVERSE_REMOTE__URL=https://xyz.supabase.co
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

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

    if let Some(url) = config.remote.url.as_deref().map(str::trim) {
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Remote URL must start with http:// or https://: {}",
                url
            )));
        }
    }

    if let Some(url) = config.extractor.service_url() {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Extractor URL must start with http:// or https://: {}",
                url
            )));
        }
    }

    if !(config.mock.latency_scale >= 0.0) {
        return Err(ConfigError::ValidationError(
            "Mock latency scale must be >= 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Max Upload Size: {} bytes", config.server.max_upload_size);
    if config.remote.is_configured() {
        tracing::info!("Remote URL: {}", config.remote.url.as_deref().unwrap_or_default());
        tracing::info!("Remote Key: {}", config.remote.masked_key());
        tracing::info!("Remote Timeout: {}s", config.remote.timeout_secs);
    } else {
        tracing::info!("Remote: not configured");
        tracing::info!("Mock Latency Scale: {}", config.mock.latency_scale);
    }
    match config.extractor.service_url() {
        Some(url) => tracing::info!("Extractor URL: {}", url),
        None => tracing::info!("Extractor: plain text only"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
