//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、DocumentExtractor、Notifier）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    // Novel commands
    CreateNovel,
    DeleteNovel,
    UpdateNovel,
    // Chapter commands
    BatchImportChapters,
    CreateChapter,
    DeleteChapter,
    ImportChapter,
    ReorderChapters,
    UpdateChapter,
    // Handlers
    handlers::{
        BatchImportChaptersHandler, BatchImportReport, CreateChapterHandler, CreateNovelHandler,
        DeleteChapterHandler, DeleteNovelHandler, ImportChapterHandler, ImportOutcome,
        ImportStatus, ImportedChapter, ReorderChaptersHandler, UpdateChapterHandler,
        UpdateNovelHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Repositories
    ChapterRepositoryPort,
    NovelRepositoryPort,
    RepositoryError,
    // Document extractor
    DocumentExtractorPort,
    DocumentFile,
    ExtractedDocument,
    ExtractionError,
    // Notifier
    Notification,
    NotificationLevel,
    NotifierPort,
};

pub use queries::{
    // Novel queries
    GetNovel,
    LatestNovels,
    ListGenres,
    ListNovels,
    NovelDetail,
    SearchNovels,
    // Chapter queries
    GetChapter,
    LatestChapters,
    ListChapters,
    ReadChapter,
    // Handlers
    handlers::{
        GetChapterHandler, GetNovelHandler, LatestChaptersHandler, LatestNovelsHandler,
        ListChaptersHandler, ListGenresHandler, ListNovelsHandler, NovelDetailHandler,
        NovelDetailView, ReadChapterHandler, ReadingView, SearchNovelsHandler,
    },
};
