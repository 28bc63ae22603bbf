//! Novel Command Handlers

use std::sync::Arc;

use super::validation::validate_novel;
use crate::application::commands::{CreateNovel, DeleteNovel, UpdateNovel};
use crate::application::error::{report_failure, ApplicationError};
use crate::application::ports::{
    messages, ChapterRepositoryPort, NotifierPort, NovelRepositoryPort,
};
use crate::domain::novel::Novel;

// ============================================================================
// CreateNovel
// ============================================================================

/// CreateNovel Handler
pub struct CreateNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl CreateNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            novel_repo,
            notifier,
        }
    }

    pub async fn handle(&self, command: CreateNovel) -> Result<Novel, ApplicationError> {
        let draft = validate_novel(&command.draft)?;

        let novel = self
            .novel_repo
            .create(&draft)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVEL_CREATE_FAILED, e))?;

        tracing::info!(
            novel_id = %novel.id,
            title = %novel.title,
            genres = novel.genres.len(),
            "Novel created"
        );
        self.notifier.success(messages::NOVEL_CREATED);

        Ok(novel)
    }
}

// ============================================================================
// UpdateNovel
// ============================================================================

/// UpdateNovel Handler
pub struct UpdateNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl UpdateNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            novel_repo,
            notifier,
        }
    }

    pub async fn handle(&self, command: UpdateNovel) -> Result<Novel, ApplicationError> {
        let draft = validate_novel(&command.draft)?;

        let updated = self
            .novel_repo
            .update(&command.novel_id, &draft)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVEL_UPDATE_FAILED, e))?;

        let Some(novel) = updated else {
            tracing::warn!(novel_id = %command.novel_id, "Novel to update not found");
            self.notifier.error(messages::NOVEL_NOT_FOUND);
            return Err(ApplicationError::not_found("Novel", &command.novel_id));
        };

        tracing::info!(novel_id = %novel.id, title = %novel.title, "Novel updated");
        self.notifier.success(messages::NOVEL_UPDATED);

        Ok(novel)
    }
}

// ============================================================================
// DeleteNovel
// ============================================================================

/// DeleteNovel Handler
///
/// 先删除小说，再尽力删除其章节；章节删除失败只记录警告
pub struct DeleteNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl DeleteNovelHandler {
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

    /// 返回是否确实删除了小说
    pub async fn handle(&self, command: DeleteNovel) -> Result<bool, ApplicationError> {
        let novel_id = command.novel_id;

        let deleted = self
            .novel_repo
            .delete(&novel_id)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVEL_DELETE_FAILED, e))?;

        if !deleted {
            tracing::warn!(novel_id = %novel_id, "Novel to delete not found");
            self.notifier.error(messages::NOVEL_NOT_FOUND);
            return Ok(false);
        }

        match self.chapter_repo.delete_by_novel(&novel_id).await {
            Ok(count) => tracing::debug!(novel_id = %novel_id, chapters = count, "Chapters removed"),
            Err(e) => tracing::warn!(
                novel_id = %novel_id,
                error = %e,
                "Failed to remove chapters of deleted novel"
            ),
        }

        tracing::info!(novel_id = %novel_id, "Novel deleted");
        self.notifier.success(messages::NOVEL_DELETED);

        Ok(true)
    }
}
