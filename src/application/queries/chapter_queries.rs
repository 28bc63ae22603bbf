//! Chapter Queries

use crate::domain::chapter::ChapterId;
use crate::domain::novel::NovelId;

/// 获取单个章节
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub chapter_id: ChapterId,
}

/// 小说的全部章节（按序号升序）
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub novel_id: NovelId,
}

/// 首页最新章节（每本小说一条）
#[derive(Debug, Clone)]
pub struct LatestChapters {
    /// 从 1 开始
    pub page: usize,
}

/// 阅读页：章节 + 所属小说 + 前后章
#[derive(Debug, Clone)]
pub struct ReadChapter {
    pub chapter_id: ChapterId,
}
