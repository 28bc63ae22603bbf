//! In-Memory Chapter Repository
//!
//! 序号维护（追加 / 删除后重排 / 手动重排）都在单次表写入内完成

use async_trait::async_trait;
use std::sync::Arc;

use super::MockStore;
use crate::application::ports::{ChapterRepositoryPort, RepositoryError};
use crate::domain::chapter::{
    apply_reorder, next_order, resequence, Chapter, ChapterDraft, ChapterId,
};
use crate::domain::novel::NovelId;

/// 内存章节仓储
pub struct MemoryChapterRepository {
    store: Arc<MockStore>,
}

impl MemoryChapterRepository {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChapterRepositoryPort for MemoryChapterRepository {
    async fn find_by_novel(&self, novel_id: &NovelId) -> Result<Vec<Chapter>, RepositoryError> {
        self.store.latency.list().await;
        let mut chapters = self
            .store
            .chapters
            .filter(|c| &c.novel_id == novel_id)
            .await;
        chapters.sort_by_key(|c| c.order);
        Ok(chapters)
    }

    async fn find_by_id(&self, id: &ChapterId) -> Result<Option<Chapter>, RepositoryError> {
        self.store.latency.read().await;
        Ok(self.store.chapters.get(id).await)
    }

    async fn create(
        &self,
        novel_id: &NovelId,
        draft: &ChapterDraft,
    ) -> Result<Chapter, RepositoryError> {
        self.store.latency.write().await;

        let chapter = self
            .store
            .chapters
            .mutate(|rows| {
                let order = next_order(
                    rows.values()
                        .filter(|c| &c.novel_id == novel_id)
                        .map(|c| c.order),
                );
                let chapter = Chapter::new(novel_id.clone(), draft, order);
                rows.insert(chapter.id.clone(), chapter.clone());
                chapter
            })
            .await;

        tracing::debug!(
            chapter_id = %chapter.id,
            novel_id = %novel_id,
            order = chapter.order,
            "Chapter stored in mock store"
        );
        Ok(chapter)
    }

    async fn update(
        &self,
        id: &ChapterId,
        draft: &ChapterDraft,
    ) -> Result<Option<Chapter>, RepositoryError> {
        self.store.latency.write().await;
        Ok(self
            .store
            .chapters
            .update(id, |chapter| chapter.apply(draft))
            .await)
    }

    async fn delete(&self, id: &ChapterId) -> Result<bool, RepositoryError> {
        self.store.latency.delete().await;

        let resequenced = self
            .store
            .chapters
            .mutate(|rows| {
                let removed = rows.remove(id)?;
                let mut siblings: Vec<Chapter> = rows
                    .values()
                    .filter(|c| c.novel_id == removed.novel_id)
                    .cloned()
                    .collect();
                let changed = resequence(&mut siblings);
                for chapter in siblings {
                    rows.insert(chapter.id.clone(), chapter);
                }
                Some(changed.len())
            })
            .await;

        match resequenced {
            Some(changed) => {
                tracing::debug!(chapter_id = %id, resequenced = changed, "Chapter removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reorder(
        &self,
        novel_id: &NovelId,
        ordered_ids: &[ChapterId],
    ) -> Result<(), RepositoryError> {
        self.store.latency.write().await;

        let outcome = self
            .store
            .chapters
            .mutate(|rows| {
                let mut siblings: Vec<Chapter> = rows
                    .values()
                    .filter(|c| &c.novel_id == novel_id)
                    .cloned()
                    .collect();
                let outcome = apply_reorder(&mut siblings, ordered_ids);
                for chapter in siblings {
                    if outcome.updated.contains(&chapter.id) {
                        rows.insert(chapter.id.clone(), chapter);
                    }
                }
                outcome
            })
            .await;

        if outcome.omitted > 0 || outcome.unknown > 0 {
            tracing::warn!(
                novel_id = %novel_id,
                omitted = outcome.omitted,
                unknown = outcome.unknown,
                "Reorder list does not cover the novel's chapters exactly"
            );
        }
        tracing::debug!(novel_id = %novel_id, updated = outcome.updated.len(), "Chapters reordered");
        Ok(())
    }

    async fn delete_by_novel(&self, novel_id: &NovelId) -> Result<usize, RepositoryError> {
        self.store.latency.delete().await;
        let removed = self
            .store
            .chapters
            .mutate(|rows| {
                let before = rows.len();
                rows.retain(|_, c| &c.novel_id != novel_id);
                before - rows.len()
            })
            .await;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::MockLatency;

    fn repo() -> MemoryChapterRepository {
        MemoryChapterRepository::new(MockStore::seeded(MockLatency::none()).arc())
    }

    fn draft(title: &str) -> ChapterDraft {
        ChapterDraft::new(title, "Some content")
    }

    async fn orders(repo: &MemoryChapterRepository, novel_id: &str) -> Vec<(String, u32)> {
        repo.find_by_novel(&novel_id.into())
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.id.to_string(), c.order))
            .collect()
    }

    #[tokio::test]
    async fn test_create_appends_after_max_order() {
        let repo = repo();
        let chapter = repo.create(&"1".into(), &draft("Four")).await.unwrap();
        assert_eq!(chapter.order, 4);

        let first = repo.create(&"3".into(), &draft("One")).await.unwrap();
        assert_eq!(first.order, 1);
    }

    #[tokio::test]
    async fn test_delete_resequences_siblings() {
        let repo = repo();
        assert!(repo.delete(&"2".into()).await.unwrap());

        assert_eq!(
            orders(&repo, "1").await,
            vec![("1".to_string(), 1), ("3".to_string(), 2)]
        );
        // 其他小说不受影响
        assert_eq!(orders(&repo, "2").await, vec![("4".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        assert!(!repo().delete(&"missing".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_reorder_by_list_position() {
        let repo = repo();
        repo.reorder(&"1".into(), &["3".into(), "1".into(), "2".into()])
            .await
            .unwrap();

        assert_eq!(
            orders(&repo, "1").await,
            vec![
                ("3".to_string(), 1),
                ("1".to_string(), 2),
                ("2".to_string(), 3)
            ]
        );
    }

    #[tokio::test]
    async fn test_reorder_ignores_foreign_ids() {
        let repo = repo();
        repo.reorder(&"1".into(), &["4".into(), "2".into()])
            .await
            .unwrap();

        let chapter = repo.find_by_id(&"4".into()).await.unwrap().unwrap();
        assert_eq!(chapter.order, 1);
        let moved = repo.find_by_id(&"2".into()).await.unwrap().unwrap();
        assert_eq!(moved.order, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_order() {
        let repo = repo();
        let updated = repo
            .update(&"2".into(), &ChapterDraft::new("Renamed", "New text"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.order, 2);
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_by_novel_counts_rows() {
        let repo = repo();
        assert_eq!(repo.delete_by_novel(&"1".into()).await.unwrap(), 3);
        assert!(orders(&repo, "1").await.is_empty());
        assert_eq!(repo.delete_by_novel(&"1".into()).await.unwrap(), 0);
    }
}
