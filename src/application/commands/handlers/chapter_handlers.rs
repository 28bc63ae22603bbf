//! Chapter Command Handlers

use std::sync::Arc;

use super::validation::validate_chapter;
use crate::application::commands::{CreateChapter, DeleteChapter, ReorderChapters, UpdateChapter};
use crate::application::error::{report_failure, ApplicationError};
use crate::application::ports::{
    messages, ChapterRepositoryPort, NotifierPort, NovelRepositoryPort, RepositoryError,
};
use crate::domain::chapter::Chapter;
use crate::domain::novel::NovelId;

/// 确认小说存在；查询失败按 `failure` 上报
pub(super) async fn ensure_novel(
    novel_repo: &dyn NovelRepositoryPort,
    notifier: &dyn NotifierPort,
    novel_id: &NovelId,
    failure: &str,
) -> Result<(), ApplicationError> {
    let novel = novel_repo
        .find_by_id(novel_id)
        .await
        .map_err(|e| report_failure(notifier, failure, e))?;

    if novel.is_none() {
        tracing::warn!(novel_id = %novel_id, "Novel not found");
        notifier.error(messages::NOVEL_NOT_FOUND);
        return Err(ApplicationError::not_found("Novel", novel_id));
    }
    Ok(())
}

// ============================================================================
// CreateChapter
// ============================================================================

/// CreateChapter Handler
pub struct CreateChapterHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl CreateChapterHandler {
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

    pub async fn handle(&self, command: CreateChapter) -> Result<Chapter, ApplicationError> {
        let draft = validate_chapter(&command.draft)?;
        ensure_novel(
            self.novel_repo.as_ref(),
            self.notifier.as_ref(),
            &command.novel_id,
            messages::CHAPTER_CREATE_FAILED,
        )
        .await?;

        let chapter = self
            .chapter_repo
            .create(&command.novel_id, &draft)
            .await
            .map_err(|e| {
                report_failure(self.notifier.as_ref(), messages::CHAPTER_CREATE_FAILED, e)
            })?;

        tracing::info!(
            chapter_id = %chapter.id,
            novel_id = %chapter.novel_id,
            order = chapter.order,
            "Chapter created"
        );
        self.notifier.success(messages::CHAPTER_CREATED);

        Ok(chapter)
    }
}

// ============================================================================
// UpdateChapter
// ============================================================================

/// UpdateChapter Handler
pub struct UpdateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl UpdateChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            chapter_repo,
            notifier,
        }
    }

    pub async fn handle(&self, command: UpdateChapter) -> Result<Chapter, ApplicationError> {
        let draft = validate_chapter(&command.draft)?;

        let updated = self
            .chapter_repo
            .update(&command.chapter_id, &draft)
            .await
            .map_err(|e| {
                report_failure(self.notifier.as_ref(), messages::CHAPTER_UPDATE_FAILED, e)
            })?;

        let Some(chapter) = updated else {
            tracing::warn!(chapter_id = %command.chapter_id, "Chapter to update not found");
            self.notifier.error(messages::CHAPTER_NOT_FOUND);
            return Err(ApplicationError::not_found("Chapter", &command.chapter_id));
        };

        tracing::info!(chapter_id = %chapter.id, "Chapter updated");
        self.notifier.success(messages::CHAPTER_UPDATED);

        Ok(chapter)
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// DeleteChapter Handler
pub struct DeleteChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl DeleteChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            chapter_repo,
            notifier,
        }
    }

    /// 返回是否确实删除了章节
    pub async fn handle(&self, command: DeleteChapter) -> Result<bool, ApplicationError> {
        let deleted = self
            .chapter_repo
            .delete(&command.chapter_id)
            .await
            .map_err(|e| {
                report_failure(self.notifier.as_ref(), messages::CHAPTER_DELETE_FAILED, e)
            })?;

        if !deleted {
            tracing::warn!(chapter_id = %command.chapter_id, "Chapter to delete not found");
            self.notifier.error(messages::CHAPTER_NOT_FOUND);
            return Ok(false);
        }

        tracing::info!(chapter_id = %command.chapter_id, "Chapter deleted");
        self.notifier.success(messages::CHAPTER_DELETED);

        Ok(true)
    }
}

// ============================================================================
// ReorderChapters
// ============================================================================

/// ReorderChapters Handler
pub struct ReorderChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl ReorderChaptersHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            chapter_repo,
            notifier,
        }
    }

    /// 返回重排后的章节列表
    pub async fn handle(&self, command: ReorderChapters) -> Result<Vec<Chapter>, ApplicationError> {
        let report = |e: RepositoryError| {
            report_failure(
                self.notifier.as_ref(),
                messages::CHAPTER_ORDER_UPDATE_FAILED,
                e,
            )
        };

        self.chapter_repo
            .reorder(&command.novel_id, &command.chapter_ids)
            .await
            .map_err(report)?;

        let chapters = self
            .chapter_repo
            .find_by_novel(&command.novel_id)
            .await
            .map_err(report)?;

        tracing::info!(
            novel_id = %command.novel_id,
            chapters = chapters.len(),
            "Chapters reordered"
        );
        self.notifier.success(messages::CHAPTER_ORDER_UPDATED);

        Ok(chapters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{Notification, NotificationLevel};
    use crate::application::testing::Fixture;
    use crate::domain::chapter::ChapterDraft;

    fn orders(chapters: &[Chapter]) -> Vec<(String, u32)> {
        chapters
            .iter()
            .map(|c| (c.title.clone(), c.order))
            .collect()
    }

    #[tokio::test]
    async fn test_first_chapter_gets_order_one_then_appends() {
        let fx = Fixture::seeded();
        let handler =
            CreateChapterHandler::new(fx.novels.clone(), fx.chapters.clone(), fx.notifier());

        let first = handler
            .handle(CreateChapter {
                novel_id: "3".into(),
                draft: ChapterDraft::new("Prologue", "It was raining."),
            })
            .await
            .unwrap();
        let second = handler
            .handle(CreateChapter {
                novel_id: "3".into(),
                draft: ChapterDraft::new("The Case", "A knock at the door."),
            })
            .await
            .unwrap();

        assert_eq!(first.order, 1);
        assert_eq!(second.order, 2);
        assert_eq!(
            fx.notifier.messages(NotificationLevel::Success),
            vec![messages::CHAPTER_CREATED, messages::CHAPTER_CREATED]
        );
    }

    #[tokio::test]
    async fn test_create_for_missing_novel_fails() {
        let fx = Fixture::seeded();
        let handler =
            CreateChapterHandler::new(fx.novels.clone(), fx.chapters.clone(), fx.notifier());

        let err = handler
            .handle(CreateChapter {
                novel_id: "missing".into(),
                draft: ChapterDraft::new("Orphan", "text"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { .. }));
        assert!(fx.chapters.find_by_novel(&"missing".into()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_middle_chapter_keeps_dense_order() {
        let fx = Fixture::seeded();
        let handler = DeleteChapterHandler::new(fx.chapters.clone(), fx.notifier());

        assert!(handler
            .handle(DeleteChapter {
                chapter_id: "2".into(),
            })
            .await
            .unwrap());

        let remaining = fx.chapters.find_by_novel(&"1".into()).await.unwrap();
        assert_eq!(
            orders(&remaining),
            vec![
                ("The Beginning".to_string(), 1),
                ("The Training".to_string(), 2)
            ]
        );
        assert_eq!(
            fx.notifier.last(),
            Some(Notification::success(messages::CHAPTER_DELETED))
        );
    }

    #[tokio::test]
    async fn test_update_keeps_order_and_reports_missing() {
        let fx = Fixture::seeded();
        let handler = UpdateChapterHandler::new(fx.chapters.clone(), fx.notifier());

        let updated = handler
            .handle(UpdateChapter {
                chapter_id: "3".into(),
                draft: ChapterDraft::new("Training Day", "Revised."),
            })
            .await
            .unwrap();
        assert_eq!(updated.order, 3);

        let err = handler
            .handle(UpdateChapter {
                chapter_id: "missing".into(),
                draft: ChapterDraft::new("X", "Y"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
        assert_eq!(
            fx.notifier.last(),
            Some(Notification::error(messages::CHAPTER_NOT_FOUND))
        );
    }

    #[tokio::test]
    async fn test_reorder_returns_new_sequence() {
        let fx = Fixture::seeded();
        let handler = ReorderChaptersHandler::new(fx.chapters.clone(), fx.notifier());

        let chapters = handler
            .handle(ReorderChapters {
                novel_id: "1".into(),
                chapter_ids: vec!["2".into(), "3".into(), "1".into()],
            })
            .await
            .unwrap();

        assert_eq!(
            orders(&chapters),
            vec![
                ("The Discovery".to_string(), 1),
                ("The Training".to_string(), 2),
                ("The Beginning".to_string(), 3)
            ]
        );
        assert_eq!(
            fx.notifier.last(),
            Some(Notification::success(messages::CHAPTER_ORDER_UPDATED))
        );
    }
}
