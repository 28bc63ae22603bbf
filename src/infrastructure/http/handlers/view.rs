//! View HTTP Handlers - 首页与阅读页

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{LatestChapters, LatestNovels, ReadChapter, ReadingView};
use crate::domain::novel::Novel;
use crate::domain::reading::{ChapterWithNovel, Page};
use crate::infrastructure::http::dto::{ApiResponse, ChapterIdRequest, PageRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 首页最新小说
pub async fn latest_novels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Novel>>>, ApiError> {
    let novels = state.latest_novels_handler.handle(LatestNovels).await?;
    Ok(Json(ApiResponse::success(novels)))
}

/// 首页最新章节（分页）
pub async fn latest_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PageRequest>,
) -> Result<Json<ApiResponse<Page<ChapterWithNovel>>>, ApiError> {
    let page = state
        .latest_chapters_handler
        .handle(LatestChapters { page: req.page })
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// 阅读页
pub async fn read_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterIdRequest>,
) -> Result<Json<ApiResponse<ReadingView>>, ApiError> {
    let view = state
        .read_chapter_handler
        .handle(ReadChapter {
            chapter_id: req.chapter_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(view)))
}
