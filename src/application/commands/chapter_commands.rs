//! Chapter Commands

use crate::application::ports::DocumentFile;
use crate::domain::chapter::{ChapterDraft, ChapterId};
use crate::domain::novel::NovelId;

/// 创建章节命令（追加到末尾）
#[derive(Debug, Clone)]
pub struct CreateChapter {
    pub novel_id: NovelId,
    pub draft: ChapterDraft,
}

/// 更新章节命令
#[derive(Debug, Clone)]
pub struct UpdateChapter {
    pub chapter_id: ChapterId,
    pub draft: ChapterDraft,
}

/// 删除章节命令
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub chapter_id: ChapterId,
}

/// 章节重排命令
#[derive(Debug, Clone)]
pub struct ReorderChapters {
    pub novel_id: NovelId,
    /// 章节 ID，按新顺序排列
    pub chapter_ids: Vec<ChapterId>,
}

/// 从文档导入单个章节
#[derive(Debug, Clone)]
pub struct ImportChapter {
    pub novel_id: NovelId,
    pub file: DocumentFile,
    /// 章节标题；为空时使用去掉扩展名的文件名
    pub title: Option<String>,
}

/// 批量导入章节（每个文件一章）
#[derive(Debug, Clone)]
pub struct BatchImportChapters {
    pub novel_id: NovelId,
    pub files: Vec<DocumentFile>,
}
