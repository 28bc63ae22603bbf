//! Chapter Context - 章节限界上下文
//!
//! 职责:
//! - 章节实体
//! - 连续序号维护（追加 / 删除后重排 / 手动重排）
//! - 相邻章节查找

mod entity;
mod ordering;

pub use crate::domain::novel::ChapterId;
pub use entity::{Chapter, ChapterDraft};
pub use ordering::{apply_reorder, neighbors, next_order, positions, resequence, ReorderOutcome};
