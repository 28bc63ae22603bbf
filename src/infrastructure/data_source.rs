//! Data Source Selector - 远程模式 / Mock 模式选择
//!
//! 启动时根据配置选择一次，之后所有仓储都指向同一个数据源

use serde::Serialize;
use std::sync::Arc;

use crate::application::ports::{ChapterRepositoryPort, NovelRepositoryPort, RepositoryError};
use crate::config::{MockConfig, RemoteConfig};
use crate::infrastructure::memory::{
    MemoryChapterRepository, MemoryNovelRepository, MockLatency, MockStore,
};
use crate::infrastructure::remote::{
    RemoteChapterRepository, RemoteClient, RemoteClientConfig, RemoteNovelRepository,
};

/// 数据源模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    Remote,
    Mock,
}

impl DataSourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Mock => "mock",
        }
    }
}

/// 已选定的数据源
#[derive(Clone)]
pub struct DataSource {
    pub mode: DataSourceMode,
    pub novels: Arc<dyn NovelRepositoryPort>,
    pub chapters: Arc<dyn ChapterRepositoryPort>,
}

impl DataSource {
    /// 根据配置选择数据源
    ///
    /// 远程配置无效（如密钥错误）时不会回退到 Mock 模式，错误在调用时暴露
    pub fn select(remote: &RemoteConfig, mock: &MockConfig) -> Result<Self, RepositoryError> {
        match (remote.url.as_deref(), remote.key.as_deref()) {
            (Some(url), Some(key)) if remote.is_configured() => {
                let client = RemoteClient::new(
                    RemoteClientConfig::new(url.trim(), key.trim())
                        .with_timeout(remote.timeout_secs),
                )?;
                tracing::info!(url = %url.trim(), "Using remote data service");
                Ok(Self::remote(Arc::new(client)))
            }
            _ => {
                tracing::info!(
                    latency_scale = mock.latency_scale,
                    "Remote data service not configured, using mock store"
                );
                Ok(Self::mock(
                    MockStore::seeded(MockLatency::new(mock.latency_scale)).arc(),
                ))
            }
        }
    }

    pub fn remote(client: Arc<RemoteClient>) -> Self {
        Self {
            mode: DataSourceMode::Remote,
            novels: Arc::new(RemoteNovelRepository::new(client.clone())),
            chapters: Arc::new(RemoteChapterRepository::new(client)),
        }
    }

    pub fn mock(store: Arc<MockStore>) -> Self {
        Self {
            mode: DataSourceMode::Mock,
            novels: Arc::new(MemoryNovelRepository::new(store.clone())),
            chapters: Arc::new(MemoryChapterRepository::new(store)),
        }
    }
}
