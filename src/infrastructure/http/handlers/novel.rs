//! Novel HTTP Handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{
    CreateNovel, DeleteNovel, GetNovel, ListGenres, ListNovels, NovelDetail, NovelDetailView,
    SearchNovels, UpdateNovel,
};
use crate::domain::novel::{Genre, GenreId, Novel, NovelDraft, NovelId};
use crate::domain::reading::ChapterSort;
use crate::infrastructure::http::dto::{
    default_page, ApiResponse, DeletedResponse, NovelIdRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNovelRequest {
    pub novel_id: NovelId,
    #[serde(flatten)]
    pub draft: NovelDraft,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNovelsRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelDetailRequest {
    pub novel_id: NovelId,
    #[serde(default)]
    pub sort: ChapterSort,
    #[serde(default = "default_page")]
    pub page: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出所有小说
pub async fn list_novels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Novel>>>, ApiError> {
    let novels = state.list_novels_handler.handle(ListNovels).await?;
    Ok(Json(ApiResponse::success(novels)))
}

/// 获取小说
pub async fn get_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NovelIdRequest>,
) -> Result<Json<ApiResponse<Novel>>, ApiError> {
    let novel = state
        .get_novel_handler
        .handle(GetNovel {
            novel_id: req.novel_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(novel)))
}

/// 创建小说
pub async fn create_novel(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<NovelDraft>,
) -> Result<Json<ApiResponse<Novel>>, ApiError> {
    let novel = state
        .create_novel_handler
        .handle(CreateNovel { draft })
        .await?;
    Ok(Json(ApiResponse::success(novel)))
}

/// 更新小说
pub async fn update_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateNovelRequest>,
) -> Result<Json<ApiResponse<Novel>>, ApiError> {
    let novel = state
        .update_novel_handler
        .handle(UpdateNovel {
            novel_id: req.novel_id,
            draft: req.draft,
        })
        .await?;
    Ok(Json(ApiResponse::success(novel)))
}

/// 删除小说（连同其章节）
pub async fn delete_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NovelIdRequest>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let deleted = state
        .delete_novel_handler
        .handle(DeleteNovel {
            novel_id: req.novel_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(DeletedResponse { deleted })))
}

/// 关键字 + 题材搜索
pub async fn search_novels(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchNovelsRequest>,
) -> Result<Json<ApiResponse<Vec<Novel>>>, ApiError> {
    let novels = state
        .search_novels_handler
        .handle(SearchNovels {
            query: req.query,
            genre_ids: req.genre_ids,
        })
        .await?;
    Ok(Json(ApiResponse::success(novels)))
}

/// 详情页：小说 + 分页章节
pub async fn novel_detail(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NovelDetailRequest>,
) -> Result<Json<ApiResponse<NovelDetailView>>, ApiError> {
    let view = state
        .novel_detail_handler
        .handle(NovelDetail {
            novel_id: req.novel_id,
            sort: req.sort,
            page: req.page,
        })
        .await?;
    Ok(Json(ApiResponse::success(view)))
}

/// 列出题材
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Genre>>>, ApiError> {
    let genres = state.list_genres_handler.handle(ListGenres).await?;
    Ok(Json(ApiResponse::success(genres)))
}
