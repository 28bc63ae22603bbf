//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                       GET   健康检查（含数据源模式）
//! - /api/novel/list                 GET   列出所有小说
//! - /api/novel/get|create|update|delete|search|detail  POST
//! - /api/genre/list                 GET   列出题材
//! - /api/chapter/list|get|create|update|delete|reorder POST
//! - /api/chapter/import             POST  multipart: novelId, title?, file
//! - /api/chapter/import_batch       POST  multipart: novelId, file...
//! - /api/view/latest_novels         GET   首页最新小说
//! - /api/view/latest_chapters|read  POST  首页最新章节 / 阅读页
//! - /ws/events                      WS    通知推送

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::global_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/novel", novel_routes())
        .route("/genre/list", get(handlers::list_genres))
        .nest("/chapter", chapter_routes())
        .nest("/view", view_routes())
}

/// Novel 路由
fn novel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_novels))
        .route("/get", post(handlers::get_novel))
        .route("/create", post(handlers::create_novel))
        .route("/update", post(handlers::update_novel))
        .route("/delete", post(handlers::delete_novel))
        .route("/search", post(handlers::search_novels))
        .route("/detail", post(handlers::novel_detail))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", post(handlers::list_chapters))
        .route("/get", post(handlers::get_chapter))
        .route("/create", post(handlers::create_chapter))
        .route("/update", post(handlers::update_chapter))
        .route("/delete", post(handlers::delete_chapter))
        .route("/reorder", post(handlers::reorder_chapters))
        .route("/import", post(handlers::import_chapter))
        .route("/import_batch", post(handlers::import_chapters_batch))
}

/// View 路由
fn view_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/latest_novels", get(handlers::latest_novels))
        .route("/latest_chapters", post(handlers::latest_chapters))
        .route("/read", post(handlers::read_chapter))
}
