//! Notifier Port - 用户通知出口
//!
//! 每个写操作结束时发出一条成功 / 失败通知，由 UI 层展示。
//! 通知是副作用，不属于仓储的返回契约。

use serde::{Deserialize, Serialize};

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// 用户通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// 固定的通知文案
pub mod messages {
    pub const NOVEL_CREATED: &str = "Novel created successfully!";
    pub const NOVEL_CREATE_FAILED: &str = "Failed to create novel";
    pub const NOVEL_UPDATED: &str = "Novel updated successfully!";
    pub const NOVEL_UPDATE_FAILED: &str = "Failed to update novel";
    pub const NOVEL_DELETED: &str = "Novel deleted successfully!";
    pub const NOVEL_DELETE_FAILED: &str = "Failed to delete novel";
    pub const NOVEL_NOT_FOUND: &str = "Novel not found";
    pub const NOVELS_FETCH_FAILED: &str = "Failed to fetch novels";
    pub const NOVEL_FETCH_FAILED: &str = "Failed to fetch novel";
    pub const NOVELS_SEARCH_FAILED: &str = "Failed to search novels";
    pub const GENRES_FETCH_FAILED: &str = "Failed to fetch genres";

    pub const CHAPTER_CREATED: &str = "Chapter created successfully!";
    pub const CHAPTER_CREATE_FAILED: &str = "Failed to create chapter";
    pub const CHAPTER_UPDATED: &str = "Chapter updated successfully!";
    pub const CHAPTER_UPDATE_FAILED: &str = "Failed to update chapter";
    pub const CHAPTER_DELETED: &str = "Chapter deleted successfully!";
    pub const CHAPTER_DELETE_FAILED: &str = "Failed to delete chapter";
    pub const CHAPTER_NOT_FOUND: &str = "Chapter not found";
    pub const CHAPTERS_FETCH_FAILED: &str = "Failed to fetch chapters";
    pub const CHAPTER_FETCH_FAILED: &str = "Failed to fetch chapter";
    pub const CHAPTER_ORDER_UPDATED: &str = "Chapter order updated";
    pub const CHAPTER_ORDER_UPDATE_FAILED: &str = "Failed to update chapter order";
    pub const DOCUMENT_IMPORT_FAILED: &str = "There was an error processing the file.";
    pub const BATCH_IMPORT_COMPLETED: &str = "Chapters imported successfully!";
    pub const BATCH_IMPORT_PARTIAL: &str = "Some files could not be imported";
}

/// Notifier Port
pub trait NotifierPort: Send + Sync {
    /// 发出通知
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}
