//! Chapter Context - Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::novel::{ChapterId, NovelId};

/// 章节表单数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDraft {
    pub title: String,
    pub content: String,
}

impl ChapterDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// 章节
///
/// 不变量:
/// - 只属于一个 Novel，生命周期受其约束
/// - `order` 在同一 Novel 内从 1 开始连续且唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub novel_id: NovelId,
    pub title: String,
    pub content: String,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(novel_id: NovelId, draft: &ChapterDraft, order: u32) -> Self {
        let now = Utc::now();
        Self {
            id: ChapterId::generate(),
            novel_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            order,
            created_at: now,
            updated_at: now,
        }
    }

    /// 更新标题和正文；`order` 不变
    pub fn apply(&mut self, draft: &ChapterDraft) {
        self.title = draft.title.clone();
        self.content = draft.content.clone();
        self.updated_at = Utc::now();
    }
}
