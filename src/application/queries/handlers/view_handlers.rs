//! View Query Handlers - 首页 / 详情页 / 阅读页聚合

use futures_util::future::{try_join, try_join_all};
use serde::Serialize;
use std::sync::Arc;

use crate::application::error::{report_failure, ApplicationError};
use crate::application::ports::{
    messages, ChapterRepositoryPort, NotifierPort, NovelRepositoryPort,
};
use crate::application::queries::{LatestChapters, LatestNovels, NovelDetail, ReadChapter};
use crate::domain::chapter::{neighbors, Chapter};
use crate::domain::novel::Novel;
use crate::domain::reading::{
    latest_chapters, latest_novels, ChapterSort, ChapterWithNovel, Page,
    DETAIL_CHAPTERS_PER_PAGE, LATEST_CHAPTERS_PER_PAGE, LATEST_NOVELS_LIMIT,
};

// ============================================================================
// Response DTOs
// ============================================================================

/// 阅读页
#[derive(Debug, Clone, Serialize)]
pub struct ReadingView {
    pub chapter: Chapter,
    pub novel: Novel,
    pub previous: Option<Chapter>,
    pub next: Option<Chapter>,
}

/// 详情页
#[derive(Debug, Clone, Serialize)]
pub struct NovelDetailView {
    pub novel: Novel,
    pub sort: ChapterSort,
    pub chapters: Page<Chapter>,
}

// ============================================================================
// Handlers
// ============================================================================

/// LatestNovels Handler
pub struct LatestNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl LatestNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            novel_repo,
            notifier,
        }
    }

    pub async fn handle(&self, _query: LatestNovels) -> Result<Vec<Novel>, ApplicationError> {
        let novels = self
            .novel_repo
            .find_all()
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVELS_FETCH_FAILED, e))?;
        Ok(latest_novels(novels, LATEST_NOVELS_LIMIT))
    }
}

/// LatestChapters Handler
///
/// 所有小说的章节作为一个并发批次读取，任一失败则整体失败
pub struct LatestChaptersHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl LatestChaptersHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            novel_repo,
            chapter_repo,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        query: LatestChapters,
    ) -> Result<Page<ChapterWithNovel>, ApplicationError> {
        let novels = self
            .novel_repo
            .find_all()
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVELS_FETCH_FAILED, e))?;

        let chapters = try_join_all(
            novels
                .iter()
                .map(|novel| self.chapter_repo.find_by_novel(&novel.id)),
        )
        .await
        .map_err(|e| report_failure(self.notifier.as_ref(), messages::CHAPTERS_FETCH_FAILED, e))?;

        let latest = latest_chapters(novels.into_iter().zip(chapters).collect());
        Ok(Page::slice(latest, query.page, LATEST_CHAPTERS_PER_PAGE))
    }
}

/// ReadChapter Handler
pub struct ReadChapterHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl ReadChapterHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            novel_repo,
            chapter_repo,
            notifier,
        }
    }

    pub async fn handle(&self, query: ReadChapter) -> Result<ReadingView, ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_by_id(&query.chapter_id)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::CHAPTER_FETCH_FAILED, e))?
            .ok_or_else(|| ApplicationError::not_found("Chapter", &query.chapter_id))?;

        let (novel, siblings) = try_join(
            self.novel_repo.find_by_id(&chapter.novel_id),
            self.chapter_repo.find_by_novel(&chapter.novel_id),
        )
        .await
        .map_err(|e| report_failure(self.notifier.as_ref(), messages::CHAPTER_FETCH_FAILED, e))?;

        let novel = novel.ok_or_else(|| ApplicationError::not_found("Novel", &chapter.novel_id))?;
        let (previous, next) = neighbors(&siblings, chapter.order);

        Ok(ReadingView {
            previous: previous.cloned(),
            next: next.cloned(),
            chapter,
            novel,
        })
    }
}

/// NovelDetail Handler
pub struct NovelDetailHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl NovelDetailHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            novel_repo,
            chapter_repo,
            notifier,
        }
    }

    pub async fn handle(&self, query: NovelDetail) -> Result<NovelDetailView, ApplicationError> {
        let (novel, mut chapters) = try_join(
            self.novel_repo.find_by_id(&query.novel_id),
            self.chapter_repo.find_by_novel(&query.novel_id),
        )
        .await
        .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVEL_FETCH_FAILED, e))?;

        let novel = novel.ok_or_else(|| ApplicationError::not_found("Novel", &query.novel_id))?;
        query.sort.apply(&mut chapters);

        Ok(NovelDetailView {
            novel,
            sort: query.sort,
            chapters: Page::slice(chapters, query.page, DETAIL_CHAPTERS_PER_PAGE),
        })
    }
}
