//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::chapter::ChapterId;
use crate::domain::novel::NovelId;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// 通用请求
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelIdRequest {
    pub novel_id: NovelId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterIdRequest {
    pub chapter_id: ChapterId,
}

/// 分页请求，页码从 1 开始
#[derive(Debug, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: usize,
}

pub fn default_page() -> usize {
    1
}

/// 删除结果
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}
