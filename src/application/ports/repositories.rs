//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（内存模拟存储 / 远程数据服务），启动时二选一注入

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chapter::{Chapter, ChapterDraft, ChapterId};
use crate::domain::novel::{Genre, Novel, NovelDraft, NovelFilter, NovelId};

/// Repository 错误
///
/// 读操作中"行不存在"用 `Option::None` / `false` 表达，不走这里
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service error [{code}]: {message}")]
    Service { code: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Novel Repository
// ============================================================================

/// Novel Repository Port
#[async_trait]
pub trait NovelRepositoryPort: Send + Sync {
    /// 获取所有小说（远程模式按创建时间倒序，内存模式不保证顺序）
    async fn find_all(&self) -> Result<Vec<Novel>, RepositoryError>;

    /// 根据 ID 查找小说
    async fn find_by_id(&self, id: &NovelId) -> Result<Option<Novel>, RepositoryError>;

    /// 创建小说，解析题材并返回完整记录
    async fn create(&self, draft: &NovelDraft) -> Result<Novel, RepositoryError>;

    /// 更新小说；ID 不存在时返回 None
    async fn update(&self, id: &NovelId, draft: &NovelDraft)
        -> Result<Option<Novel>, RepositoryError>;

    /// 删除小说；返回是否确实删除了记录
    async fn delete(&self, id: &NovelId) -> Result<bool, RepositoryError>;

    /// 可用题材（按名称排序）
    async fn list_genres(&self) -> Result<Vec<Genre>, RepositoryError>;

    /// 关键字 + 题材交集搜索
    async fn search(&self, filter: &NovelFilter) -> Result<Vec<Novel>, RepositoryError> {
        // 默认实现：全量读取后在内存中过滤
        Ok(filter.apply(self.find_all().await?))
    }
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// Chapter Repository Port
#[async_trait]
pub trait ChapterRepositoryPort: Send + Sync {
    /// 获取小说的所有章节，按序号升序
    async fn find_by_novel(&self, novel_id: &NovelId) -> Result<Vec<Chapter>, RepositoryError>;

    /// 根据 ID 查找章节
    async fn find_by_id(&self, id: &ChapterId) -> Result<Option<Chapter>, RepositoryError>;

    /// 追加章节，序号为 max(order) + 1
    async fn create(&self, novel_id: &NovelId, draft: &ChapterDraft)
        -> Result<Chapter, RepositoryError>;

    /// 更新标题和正文，不改变序号；ID 不存在时返回 None
    async fn update(&self, id: &ChapterId, draft: &ChapterDraft)
        -> Result<Option<Chapter>, RepositoryError>;

    /// 删除章节并将同一小说剩余章节重新编号为 1..N
    async fn delete(&self, id: &ChapterId) -> Result<bool, RepositoryError>;

    /// 按 ID 列表位置重排；未列出的章节保持原序号
    async fn reorder(&self, novel_id: &NovelId, ordered_ids: &[ChapterId])
        -> Result<(), RepositoryError>;

    /// 删除小说的全部章节，返回删除数量
    async fn delete_by_novel(&self, novel_id: &NovelId) -> Result<usize, RepositoryError>;
}
