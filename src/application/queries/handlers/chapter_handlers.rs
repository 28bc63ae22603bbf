//! Chapter Query Handlers

use std::sync::Arc;

use crate::application::error::{report_failure, ApplicationError};
use crate::application::ports::{messages, ChapterRepositoryPort, NotifierPort};
use crate::application::queries::{GetChapter, ListChapters};
use crate::domain::chapter::Chapter;

/// GetChapter Handler
pub struct GetChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl GetChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            chapter_repo,
            notifier,
        }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<Chapter, ApplicationError> {
        self.chapter_repo
            .find_by_id(&query.chapter_id)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::CHAPTER_FETCH_FAILED, e))?
            .ok_or_else(|| ApplicationError::not_found("Chapter", &query.chapter_id))
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl ListChaptersHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            chapter_repo,
            notifier,
        }
    }

    pub async fn handle(&self, query: ListChapters) -> Result<Vec<Chapter>, ApplicationError> {
        self.chapter_repo
            .find_by_novel(&query.novel_id)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::CHAPTERS_FETCH_FAILED, e))
    }
}
