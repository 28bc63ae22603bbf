//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    BatchImportChaptersHandler, CreateChapterHandler, CreateNovelHandler, DeleteChapterHandler,
    DeleteNovelHandler, ImportChapterHandler, ReorderChaptersHandler, UpdateChapterHandler,
    UpdateNovelHandler,
    // Query handlers
    GetChapterHandler, GetNovelHandler, LatestChaptersHandler, LatestNovelsHandler,
    ListChaptersHandler, ListGenresHandler, ListNovelsHandler, NovelDetailHandler,
    ReadChapterHandler, SearchNovelsHandler,
    // Ports
    DocumentExtractorPort, NotifierPort,
};
use crate::infrastructure::data_source::{DataSource, DataSourceMode};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
///
/// 数据源在启动时选定，所有 Handler 共享同一组仓储
pub struct AppState {
    // ========== Ports ==========
    pub mode: DataSourceMode,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub create_novel_handler: CreateNovelHandler,
    pub update_novel_handler: UpdateNovelHandler,
    pub delete_novel_handler: DeleteNovelHandler,
    pub create_chapter_handler: CreateChapterHandler,
    pub update_chapter_handler: UpdateChapterHandler,
    pub delete_chapter_handler: DeleteChapterHandler,
    pub reorder_chapters_handler: ReorderChaptersHandler,
    pub import_chapter_handler: ImportChapterHandler,
    pub batch_import_handler: BatchImportChaptersHandler,

    // ========== Query Handlers ==========
    pub get_novel_handler: GetNovelHandler,
    pub list_novels_handler: ListNovelsHandler,
    pub search_novels_handler: SearchNovelsHandler,
    pub list_genres_handler: ListGenresHandler,
    pub get_chapter_handler: GetChapterHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub latest_novels_handler: LatestNovelsHandler,
    pub latest_chapters_handler: LatestChaptersHandler,
    pub read_chapter_handler: ReadChapterHandler,
    pub novel_detail_handler: NovelDetailHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        data_source: DataSource,
        extractor: Arc<dyn DocumentExtractorPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        let DataSource {
            mode,
            novels,
            chapters,
        } = data_source;
        let notifier: Arc<dyn NotifierPort> = event_publisher.clone();

        Self {
            mode,
            event_publisher,

            // Command handlers
            create_novel_handler: CreateNovelHandler::new(novels.clone(), notifier.clone()),
            update_novel_handler: UpdateNovelHandler::new(novels.clone(), notifier.clone()),
            delete_novel_handler: DeleteNovelHandler::new(
                novels.clone(),
                chapters.clone(),
                notifier.clone(),
            ),
            create_chapter_handler: CreateChapterHandler::new(
                novels.clone(),
                chapters.clone(),
                notifier.clone(),
            ),
            update_chapter_handler: UpdateChapterHandler::new(chapters.clone(), notifier.clone()),
            delete_chapter_handler: DeleteChapterHandler::new(chapters.clone(), notifier.clone()),
            reorder_chapters_handler: ReorderChaptersHandler::new(
                chapters.clone(),
                notifier.clone(),
            ),
            import_chapter_handler: ImportChapterHandler::new(
                novels.clone(),
                chapters.clone(),
                extractor.clone(),
                notifier.clone(),
            ),
            batch_import_handler: BatchImportChaptersHandler::new(
                novels.clone(),
                chapters.clone(),
                extractor,
                notifier.clone(),
            ),

            // Query handlers
            get_novel_handler: GetNovelHandler::new(novels.clone(), notifier.clone()),
            list_novels_handler: ListNovelsHandler::new(novels.clone(), notifier.clone()),
            search_novels_handler: SearchNovelsHandler::new(novels.clone(), notifier.clone()),
            list_genres_handler: ListGenresHandler::new(novels.clone(), notifier.clone()),
            get_chapter_handler: GetChapterHandler::new(chapters.clone(), notifier.clone()),
            list_chapters_handler: ListChaptersHandler::new(chapters.clone(), notifier.clone()),
            latest_novels_handler: LatestNovelsHandler::new(novels.clone(), notifier.clone()),
            latest_chapters_handler: LatestChaptersHandler::new(
                novels.clone(),
                chapters.clone(),
                notifier.clone(),
            ),
            read_chapter_handler: ReadChapterHandler::new(
                novels.clone(),
                chapters.clone(),
                notifier.clone(),
            ),
            novel_detail_handler: NovelDetailHandler::new(novels, chapters, notifier),
        }
    }
}
