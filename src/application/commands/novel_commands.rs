//! Novel Commands

use crate::domain::novel::{NovelDraft, NovelId};

/// 创建小说命令
#[derive(Debug, Clone)]
pub struct CreateNovel {
    pub draft: NovelDraft,
}

/// 更新小说命令
#[derive(Debug, Clone)]
pub struct UpdateNovel {
    pub novel_id: NovelId,
    pub draft: NovelDraft,
}

/// 删除小说命令（级联删除章节）
#[derive(Debug, Clone)]
pub struct DeleteNovel {
    pub novel_id: NovelId,
}
