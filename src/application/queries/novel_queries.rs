//! Novel Queries

use crate::domain::novel::{GenreId, NovelId};
use crate::domain::reading::ChapterSort;

/// 获取小说详情查询
#[derive(Debug, Clone)]
pub struct GetNovel {
    pub novel_id: NovelId,
}

/// 列出所有小说查询
#[derive(Debug, Clone)]
pub struct ListNovels;

/// 关键字 + 题材交集搜索
#[derive(Debug, Clone, Default)]
pub struct SearchNovels {
    pub query: String,
    pub genre_ids: Vec<GenreId>,
}

/// 列出可用题材
#[derive(Debug, Clone)]
pub struct ListGenres;

/// 首页最新小说
#[derive(Debug, Clone)]
pub struct LatestNovels;

/// 详情页：小说 + 分页章节
#[derive(Debug, Clone)]
pub struct NovelDetail {
    pub novel_id: NovelId,
    pub sort: ChapterSort,
    /// 从 1 开始
    pub page: usize,
}
