//! Mock Store - 进程内模拟持久化
//!
//! 未配置远程数据服务时使用。每个操作前人为等待一段时间以模拟网络延迟。
//! 每个实例独立，测试可以为每个用例创建新的 Store。

use std::sync::Arc;
use std::time::Duration;

use super::seed;
use super::table::MemoryTable;
use crate::domain::chapter::Chapter;
use crate::domain::novel::{Genre, Novel};

/// 模拟延迟
///
/// 基准值（毫秒）乘以缩放系数；系数为 0 时不等待
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockLatency {
    scale: f64,
}

impl MockLatency {
    const READ_MS: u64 = 300;
    const LIST_MS: u64 = 500;
    const SEARCH_MS: u64 = 400;
    const WRITE_MS: u64 = 800;
    const DELETE_MS: u64 = 500;

    pub fn new(scale: f64) -> Self {
        Self {
            scale: scale.max(0.0),
        }
    }

    /// 不等待（测试用）
    pub fn none() -> Self {
        Self::new(0.0)
    }

    pub fn is_disabled(&self) -> bool {
        self.scale == 0.0
    }

    fn scaled(&self, base_ms: u64) -> Duration {
        Duration::from_millis((base_ms as f64 * self.scale).round() as u64)
    }

    async fn wait(&self, base_ms: u64) {
        if !self.is_disabled() {
            tokio::time::sleep(self.scaled(base_ms)).await;
        }
    }

    pub async fn read(&self) {
        self.wait(Self::READ_MS).await
    }

    pub async fn list(&self) {
        self.wait(Self::LIST_MS).await
    }

    pub async fn search(&self) {
        self.wait(Self::SEARCH_MS).await
    }

    pub async fn write(&self) {
        self.wait(Self::WRITE_MS).await
    }

    pub async fn delete(&self) {
        self.wait(Self::DELETE_MS).await
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Mock Store
pub struct MockStore {
    pub novels: MemoryTable<Novel>,
    pub chapters: MemoryTable<Chapter>,
    pub genres: MemoryTable<Genre>,
    pub latency: MockLatency,
}

impl MockStore {
    /// 空 Store
    pub fn empty(latency: MockLatency) -> Self {
        Self {
            novels: MemoryTable::new(),
            chapters: MemoryTable::new(),
            genres: MemoryTable::new(),
            latency,
        }
    }

    /// 带示例数据的 Store
    pub fn seeded(latency: MockLatency) -> Self {
        Self {
            novels: MemoryTable::from_rows(seed::novels()),
            chapters: MemoryTable::from_rows(seed::chapters()),
            genres: MemoryTable::from_rows(seed::genres()),
            latency,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_scaling() {
        let latency = MockLatency::new(0.5);
        assert_eq!(latency.scaled(800), Duration::from_millis(400));
        assert!(MockLatency::none().is_disabled());
        assert!(MockLatency::new(-1.0).is_disabled());
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = MockStore::seeded(MockLatency::none());
        assert_eq!(store.novels.len().await, 4);
        assert_eq!(store.chapters.len().await, 4);
        assert_eq!(store.genres.len().await, 7);
    }

    #[tokio::test]
    async fn test_write_latency_elapses() {
        let latency = MockLatency::new(0.01);
        let start = tokio::time::Instant::now();
        latency.write().await;
        assert!(start.elapsed() >= Duration::from_millis(8));
    }
}
