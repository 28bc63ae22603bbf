//! Chapter HTTP Handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{
    CreateChapter, DeleteChapter, GetChapter, ListChapters, ReorderChapters, UpdateChapter,
};
use crate::domain::chapter::{Chapter, ChapterDraft, ChapterId};
use crate::domain::novel::NovelId;
use crate::infrastructure::http::dto::{
    ApiResponse, ChapterIdRequest, DeletedResponse, NovelIdRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterRequest {
    pub novel_id: NovelId,
    #[serde(flatten)]
    pub draft: ChapterDraft,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChapterRequest {
    pub chapter_id: ChapterId,
    #[serde(flatten)]
    pub draft: ChapterDraft,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderChaptersRequest {
    pub novel_id: NovelId,
    /// 按新顺序排列的章节 ID
    pub chapter_ids: Vec<ChapterId>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出小说的章节（按序号升序）
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NovelIdRequest>,
) -> Result<Json<ApiResponse<Vec<Chapter>>>, ApiError> {
    let chapters = state
        .list_chapters_handler
        .handle(ListChapters {
            novel_id: req.novel_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(chapters)))
}

/// 获取章节
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterIdRequest>,
) -> Result<Json<ApiResponse<Chapter>>, ApiError> {
    let chapter = state
        .get_chapter_handler
        .handle(GetChapter {
            chapter_id: req.chapter_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(chapter)))
}

/// 创建章节（追加到末尾）
pub async fn create_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateChapterRequest>,
) -> Result<Json<ApiResponse<Chapter>>, ApiError> {
    let chapter = state
        .create_chapter_handler
        .handle(CreateChapter {
            novel_id: req.novel_id,
            draft: req.draft,
        })
        .await?;
    Ok(Json(ApiResponse::success(chapter)))
}

/// 更新章节
pub async fn update_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateChapterRequest>,
) -> Result<Json<ApiResponse<Chapter>>, ApiError> {
    let chapter = state
        .update_chapter_handler
        .handle(UpdateChapter {
            chapter_id: req.chapter_id,
            draft: req.draft,
        })
        .await?;
    Ok(Json(ApiResponse::success(chapter)))
}

/// 删除章节
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterIdRequest>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let deleted = state
        .delete_chapter_handler
        .handle(DeleteChapter {
            chapter_id: req.chapter_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(DeletedResponse { deleted })))
}

/// 章节重排
pub async fn reorder_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReorderChaptersRequest>,
) -> Result<Json<ApiResponse<Vec<Chapter>>>, ApiError> {
    let chapters = state
        .reorder_chapters_handler
        .handle(ReorderChapters {
            novel_id: req.novel_id,
            chapter_ids: req.chapter_ids,
        })
        .await?;
    Ok(Json(ApiResponse::success(chapters)))
}
