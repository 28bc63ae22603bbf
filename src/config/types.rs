//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 远程数据服务配置；未配置时使用 Mock Store
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Mock Store 配置
    #[serde(default)]
    pub mock: MockConfig,

    /// 文档提取服务配置
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 上传文件最大大小（字节），默认 20MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

fn default_max_upload_size() -> u64 {
    20 * 1024 * 1024 // 20 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 远程数据服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// 服务基础 URL
    #[serde(default)]
    pub url: Option<String>,

    /// 访问密钥
    #[serde(default)]
    pub key: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            timeout_secs: default_remote_timeout(),
        }
    }
}

impl RemoteConfig {
    /// URL 和密钥都存在且非空白时启用远程模式
    pub fn is_configured(&self) -> bool {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }
        present(&self.url) && present(&self.key)
    }

    /// 打印用：只保留密钥前 4 个字符
    pub fn masked_key(&self) -> String {
        match self.key.as_deref().map(str::trim) {
            None | Some("") => "<unset>".to_string(),
            Some(key) => {
                let prefix: String = key.chars().take(4).collect();
                format!("{}****", prefix)
            }
        }
    }
}

/// Mock Store 配置
#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    /// 模拟延迟缩放系数，0 表示不等待
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,
}

fn default_latency_scale() -> f64 {
    1.0
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_scale: default_latency_scale(),
        }
    }
}

/// 文档提取服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// 提取服务基础 URL；未设置时只支持纯文本文档
    #[serde(default)]
    pub url: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_extractor_timeout")]
    pub timeout_secs: u64,
}

fn default_extractor_timeout() -> u64 {
    60
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_extractor_timeout(),
        }
    }
}

impl ExtractorConfig {
    /// 非空白的服务 URL
    pub fn service_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.mock.latency_scale, 1.0);
        assert!(config.extractor.service_url().is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_remote_requires_url_and_key() {
        let mut remote = RemoteConfig::default();
        assert!(!remote.is_configured());

        remote.url = Some("https://db.example.com".to_string());
        assert!(!remote.is_configured());

        remote.key = Some("   ".to_string());
        assert!(!remote.is_configured());

        remote.key = Some("secret-key".to_string());
        assert!(remote.is_configured());
    }

    #[test]
    fn test_masked_key() {
        let mut remote = RemoteConfig::default();
        assert_eq!(remote.masked_key(), "<unset>");
        remote.key = Some("abcdefgh".to_string());
        assert_eq!(remote.masked_key(), "abcd****");
    }
}
