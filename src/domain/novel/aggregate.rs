//! Novel Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Genre, GenreId, NovelId};

/// 小说表单数据（创建 / 更新）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// 题材名称，由仓储解析为题材记录
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Novel 聚合根
///
/// 不变量:
/// - `genres` 是写入时按值复制的题材快照，题材改名不会回写到已保存的小说
/// - `created_at` 创建后不再改变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    pub id: NovelId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub genres: Vec<Genre>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Novel {
    /// 根据表单和已解析的题材创建小说
    pub fn new(draft: &NovelDraft, genres: Vec<Genre>) -> Self {
        let now = Utc::now();
        Self {
            id: NovelId::generate(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            genres,
            created_at: now,
            updated_at: now,
        }
    }

    /// 用表单内容覆盖可编辑字段，刷新 `updated_at`
    pub fn apply(&mut self, draft: &NovelDraft, genres: Vec<Genre>) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        self.image_url = draft.image_url.clone();
        self.genres = genres;
        self.updated_at = Utc::now();
    }

    pub fn has_genre(&self, genre_id: &GenreId) -> bool {
        self.genres.iter().any(|g| &g.id == genre_id)
    }

    /// 是否包含全部指定题材（交集过滤）
    pub fn has_all_genres(&self, genre_ids: &[GenreId]) -> bool {
        genre_ids.iter().all(|id| self.has_genre(id))
    }

    /// 标题或简介是否包含关键字（大小写不敏感）
    pub fn mentions(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
