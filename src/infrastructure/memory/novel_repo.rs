//! In-Memory Novel Repository

use async_trait::async_trait;
use std::sync::Arc;

use super::MockStore;
use crate::application::ports::{NovelRepositoryPort, RepositoryError};
use crate::domain::novel::{
    genre_key, resolve_genres, Genre, GenreResolution, Novel, NovelDraft, NovelFilter, NovelId,
};

/// 内存小说仓储
pub struct MemoryNovelRepository {
    store: Arc<MockStore>,
}

impl MemoryNovelRepository {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }

    /// 解析题材，新建的题材在同一次写入中加入题材表
    async fn resolve(&self, names: &[String]) -> Vec<Genre> {
        self.store
            .genres
            .mutate(|rows| {
                let available: Vec<Genre> = rows.values().cloned().collect();
                let GenreResolution { genres, created } = resolve_genres(names, &available);
                for genre in created {
                    tracing::debug!(genre_id = %genre.id, name = %genre.name, "Genre created");
                    rows.insert(genre.id.clone(), genre);
                }
                genres
            })
            .await
    }
}

#[async_trait]
impl NovelRepositoryPort for MemoryNovelRepository {
    async fn find_all(&self) -> Result<Vec<Novel>, RepositoryError> {
        self.store.latency.list().await;
        Ok(self.store.novels.list().await)
    }

    async fn find_by_id(&self, id: &NovelId) -> Result<Option<Novel>, RepositoryError> {
        self.store.latency.read().await;
        Ok(self.store.novels.get(id).await)
    }

    async fn create(&self, draft: &NovelDraft) -> Result<Novel, RepositoryError> {
        self.store.latency.write().await;

        let genres = self.resolve(&draft.genres).await;
        let novel = Novel::new(draft, genres);
        self.store.novels.insert(novel.clone()).await;

        tracing::debug!(novel_id = %novel.id, "Novel stored in mock store");
        Ok(novel)
    }

    async fn update(
        &self,
        id: &NovelId,
        draft: &NovelDraft,
    ) -> Result<Option<Novel>, RepositoryError> {
        self.store.latency.write().await;

        if self.store.novels.get(id).await.is_none() {
            return Ok(None);
        }

        let genres = self.resolve(&draft.genres).await;
        Ok(self
            .store
            .novels
            .update(id, |novel| novel.apply(draft, genres))
            .await)
    }

    async fn delete(&self, id: &NovelId) -> Result<bool, RepositoryError> {
        self.store.latency.delete().await;
        Ok(self.store.novels.remove(id).await.is_some())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, RepositoryError> {
        self.store.latency.read().await;
        let mut genres = self.store.genres.list().await;
        genres.sort_by_key(|g| genre_key(&g.name));
        Ok(genres)
    }

    async fn search(&self, filter: &NovelFilter) -> Result<Vec<Novel>, RepositoryError> {
        self.store.latency.search().await;
        Ok(filter.apply(self.store.novels.list().await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::GenreId;
    use crate::infrastructure::memory::MockLatency;

    fn repo() -> MemoryNovelRepository {
        MemoryNovelRepository::new(MockStore::seeded(MockLatency::none()).arc())
    }

    fn draft(title: &str, genres: &[&str]) -> NovelDraft {
        NovelDraft {
            title: title.to_string(),
            description: "A story".to_string(),
            image_url: "https://example.com/cover.jpg".to_string(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_reuses_existing_genre_case_insensitively() {
        let repo = repo();
        let novel = repo.create(&draft("Sword", &["fantasy"])).await.unwrap();

        assert_eq!(novel.genres.len(), 1);
        assert_eq!(novel.genres[0].id, GenreId::from("1"));
        assert_eq!(novel.genres[0].name, "Fantasy");
        assert_eq!(repo.list_genres().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_create_adds_new_genre_once() {
        let repo = repo();
        repo.create(&draft("Steam", &["Steampunk"])).await.unwrap();
        let second = repo.create(&draft("Gears", &["STEAMPUNK"])).await.unwrap();

        let genres = repo.list_genres().await.unwrap();
        assert_eq!(genres.len(), 8);
        let steampunk = genres.iter().find(|g| g.name == "Steampunk").unwrap();
        assert_eq!(second.genres[0].id, steampunk.id);
    }

    #[tokio::test]
    async fn test_list_genres_sorted_by_name() {
        let names: Vec<String> = repo()
            .list_genres()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = repo();
        let result = repo.update(&"missing".into(), &draft("X", &[])).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = repo();
        let before = repo.find_by_id(&"1".into()).await.unwrap().unwrap();
        let after = repo
            .update(&"1".into(), &draft("Renamed", &["Horror"]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.title, "Renamed");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.genres[0].name, "Horror");
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let repo = repo();
        assert!(repo.delete(&"3".into()).await.unwrap());
        assert!(!repo.delete(&"3".into()).await.unwrap());
        assert!(repo.find_by_id(&"3".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_genre_intersection() {
        let repo = repo();
        let filter = NovelFilter::new("", vec!["6".into(), "2".into()]);
        let found = repo.search(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Starship Odyssey");
    }
}
