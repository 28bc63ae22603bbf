//! Remote Chapter Repository
//!
//! 远程服务没有事务，删除后的重新编号和手动重排逐行 PATCH；
//! 单行失败只记录警告，不中断其余行

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use super::client::{eq, RemoteClient};
use super::rows::{ChapterInsert, ChapterPatch, ChapterRow, IdRow, OrderPatch, OrderRow, CHAPTERS};
use crate::application::ports::{ChapterRepositoryPort, RepositoryError};
use crate::domain::chapter::{
    apply_reorder, next_order, resequence, Chapter, ChapterDraft, ChapterId,
};
use crate::domain::novel::NovelId;

/// 远程章节仓储
pub struct RemoteChapterRepository {
    client: Arc<RemoteClient>,
}

impl RemoteChapterRepository {
    pub fn new(client: Arc<RemoteClient>) -> Self {
        Self { client }
    }

    /// 把指定章节的序号写回远程服务，返回成功行数
    async fn write_orders(&self, chapters: &[Chapter], ids: &[ChapterId]) -> usize {
        let mut written = 0;
        for chapter in chapters.iter().filter(|c| ids.contains(&c.id)) {
            let result: Result<Vec<IdRow>, _> = self
                .client
                .update(
                    CHAPTERS,
                    &[("id", eq(&chapter.id))],
                    &OrderPatch {
                        order: chapter.order,
                    },
                )
                .await;
            match result {
                Ok(_) => written += 1,
                Err(e) => tracing::warn!(
                    chapter_id = %chapter.id,
                    order = chapter.order,
                    error = %e,
                    "Failed to update chapter order"
                ),
            }
        }
        written
    }
}

#[async_trait]
impl ChapterRepositoryPort for RemoteChapterRepository {
    async fn find_by_novel(&self, novel_id: &NovelId) -> Result<Vec<Chapter>, RepositoryError> {
        let rows: Vec<ChapterRow> = self
            .client
            .select(
                CHAPTERS,
                &[
                    ("select", "*".to_string()),
                    ("novel_id", eq(novel_id)),
                    ("order", "order.asc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Chapter::from).collect())
    }

    async fn find_by_id(&self, id: &ChapterId) -> Result<Option<Chapter>, RepositoryError> {
        let row: Option<ChapterRow> = self
            .client
            .select_single(CHAPTERS, &[("select", "*".to_string()), ("id", eq(id))])
            .await?;
        Ok(row.map(Chapter::from))
    }

    async fn create(
        &self,
        novel_id: &NovelId,
        draft: &ChapterDraft,
    ) -> Result<Chapter, RepositoryError> {
        let last: Vec<OrderRow> = self
            .client
            .select(
                CHAPTERS,
                &[
                    ("select", "order".to_string()),
                    ("novel_id", eq(novel_id)),
                    ("order", "order.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        let order = next_order(last.into_iter().map(|row| row.order));

        let now = Utc::now();
        let insert = ChapterInsert {
            novel_id: novel_id.as_str(),
            title: &draft.title,
            content: &draft.content,
            order,
            created_at: now,
            updated_at: now,
        };
        let row: ChapterRow = self.client.insert(CHAPTERS, &insert).await?;
        Ok(Chapter::from(row))
    }

    async fn update(
        &self,
        id: &ChapterId,
        draft: &ChapterDraft,
    ) -> Result<Option<Chapter>, RepositoryError> {
        let patch = ChapterPatch {
            title: &draft.title,
            content: &draft.content,
            updated_at: Utc::now(),
        };
        let rows: Vec<ChapterRow> = self
            .client
            .update(CHAPTERS, &[("id", eq(id))], &patch)
            .await?;
        Ok(rows.into_iter().next().map(Chapter::from))
    }

    async fn delete(&self, id: &ChapterId) -> Result<bool, RepositoryError> {
        let Some(chapter) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let removed: Vec<IdRow> = self.client.delete(CHAPTERS, &[("id", eq(id))]).await?;
        if removed.is_empty() {
            return Ok(false);
        }

        // 行已删除，重新编号失败不影响删除结果
        let mut siblings = match self.find_by_novel(&chapter.novel_id).await {
            Ok(siblings) => siblings,
            Err(e) => {
                tracing::warn!(
                    chapter_id = %id,
                    novel_id = %chapter.novel_id,
                    error = %e,
                    "Chapter removed but remaining chapters could not be resequenced"
                );
                return Ok(true);
            }
        };
        let changed = resequence(&mut siblings);
        let written = self.write_orders(&siblings, &changed).await;

        tracing::debug!(
            chapter_id = %id,
            novel_id = %chapter.novel_id,
            resequenced = written,
            "Chapter removed"
        );
        Ok(true)
    }

    async fn reorder(
        &self,
        novel_id: &NovelId,
        ordered_ids: &[ChapterId],
    ) -> Result<(), RepositoryError> {
        let mut siblings = self.find_by_novel(novel_id).await?;
        let outcome = apply_reorder(&mut siblings, ordered_ids);

        if outcome.omitted > 0 || outcome.unknown > 0 {
            tracing::warn!(
                novel_id = %novel_id,
                omitted = outcome.omitted,
                unknown = outcome.unknown,
                "Reorder list does not cover the novel's chapters exactly"
            );
        }

        let written = self.write_orders(&siblings, &outcome.updated).await;
        tracing::debug!(novel_id = %novel_id, updated = written, "Chapters reordered");
        Ok(())
    }

    async fn delete_by_novel(&self, novel_id: &NovelId) -> Result<usize, RepositoryError> {
        let rows: Vec<IdRow> = self
            .client
            .delete(CHAPTERS, &[("novel_id", eq(novel_id))])
            .await?;
        Ok(rows.len())
    }
}
