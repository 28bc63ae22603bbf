//! Novel Query Handlers
//!
//! 读失败会记录日志、发出 "Failed to fetch ..." 通知并向上返回

use std::sync::Arc;

use crate::application::error::{report_failure, ApplicationError};
use crate::application::ports::{messages, NotifierPort, NovelRepositoryPort};
use crate::application::queries::{GetNovel, ListGenres, ListNovels, SearchNovels};
use crate::domain::novel::{Genre, Novel, NovelFilter};

/// GetNovel Handler
pub struct GetNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl GetNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            novel_repo,
            notifier,
        }
    }

    pub async fn handle(&self, query: GetNovel) -> Result<Novel, ApplicationError> {
        self.novel_repo
            .find_by_id(&query.novel_id)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVEL_FETCH_FAILED, e))?
            .ok_or_else(|| ApplicationError::not_found("Novel", &query.novel_id))
    }
}

/// ListNovels Handler
pub struct ListNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl ListNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            novel_repo,
            notifier,
        }
    }

    pub async fn handle(&self, _query: ListNovels) -> Result<Vec<Novel>, ApplicationError> {
        self.novel_repo
            .find_all()
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVELS_FETCH_FAILED, e))
    }
}

/// SearchNovels Handler
pub struct SearchNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl SearchNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            novel_repo,
            notifier,
        }
    }

    pub async fn handle(&self, query: SearchNovels) -> Result<Vec<Novel>, ApplicationError> {
        let filter = NovelFilter::new(query.query, query.genre_ids);
        let novels = self
            .novel_repo
            .search(&filter)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::NOVELS_SEARCH_FAILED, e))?;

        tracing::debug!(
            query = %filter.query(),
            genres = filter.genre_ids.len(),
            results = novels.len(),
            "Novels searched"
        );
        Ok(novels)
    }
}

/// ListGenres Handler
pub struct ListGenresHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl ListGenresHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self {
            novel_repo,
            notifier,
        }
    }

    pub async fn handle(&self, _query: ListGenres) -> Result<Vec<Genre>, ApplicationError> {
        self.novel_repo
            .list_genres()
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), messages::GENRES_FETCH_FAILED, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{Notification, NovelRepositoryPort, RepositoryError};
    use crate::application::testing::{Fixture, RecordingNotifier};
    use crate::domain::novel::{GenreId, NovelDraft, NovelId};
    use async_trait::async_trait;

    fn draft(title: &str, description: &str, genres: &[&str]) -> NovelDraft {
        NovelDraft {
            title: title.to_string(),
            description: description.to_string(),
            image_url: "https://example.com/cover.jpg".to_string(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Alpha[Fantasy] / Beta[Fantasy, Horror]
    async fn alpha_beta() -> (Fixture, GenreId, GenreId) {
        let fx = Fixture::empty();
        fx.novels
            .create(&draft("Alpha", "The first tale", &["Fantasy"]))
            .await
            .unwrap();
        let beta = fx
            .novels
            .create(&draft("Beta", "The second tale", &["Fantasy", "Horror"]))
            .await
            .unwrap();
        let fantasy = beta.genres[0].id.clone();
        let horror = beta.genres[1].id.clone();
        (fx, fantasy, horror)
    }

    fn titles(novels: &[Novel]) -> Vec<&str> {
        let mut titles: Vec<&str> = novels.iter().map(|n| n.title.as_str()).collect();
        titles.sort();
        titles
    }

    #[tokio::test]
    async fn test_search_empty_returns_everything() {
        let (fx, _, _) = alpha_beta().await;
        let handler = SearchNovelsHandler::new(fx.novels.clone(), fx.notifier());
        let found = handler.handle(SearchNovels::default()).await.unwrap();
        assert_eq!(titles(&found), vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_search_genre_intersection() {
        let (fx, fantasy, horror) = alpha_beta().await;
        let handler = SearchNovelsHandler::new(fx.novels.clone(), fx.notifier());

        let found = handler
            .handle(SearchNovels {
                query: String::new(),
                genre_ids: vec![fantasy.clone(), horror],
            })
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["Beta"]);

        let found = handler
            .handle(SearchNovels {
                query: String::new(),
                genre_ids: vec![fantasy],
            })
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_search_query_is_case_insensitive() {
        let (fx, _, _) = alpha_beta().await;
        let handler = SearchNovelsHandler::new(fx.novels.clone(), fx.notifier());

        let found = handler
            .handle(SearchNovels {
                query: "alpha".to_string(),
                genre_ids: vec![],
            })
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["Alpha"]);

        let found = handler
            .handle(SearchNovels {
                query: "SECOND".to_string(),
                genre_ids: vec![],
            })
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["Beta"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let fx = Fixture::seeded();
        let err = GetNovelHandler::new(fx.novels.clone(), fx.notifier())
            .handle(GetNovel {
                novel_id: "missing".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    /// 所有读取都返回传输错误的仓储
    struct UnreachableRepository;

    #[async_trait]
    impl NovelRepositoryPort for UnreachableRepository {
        async fn find_all(&self) -> Result<Vec<Novel>, RepositoryError> {
            Err(RepositoryError::Transport("connection refused".to_string()))
        }
        async fn find_by_id(&self, _id: &NovelId) -> Result<Option<Novel>, RepositoryError> {
            Err(RepositoryError::Transport("connection refused".to_string()))
        }
        async fn create(&self, _draft: &NovelDraft) -> Result<Novel, RepositoryError> {
            Err(RepositoryError::Transport("connection refused".to_string()))
        }
        async fn update(
            &self,
            _id: &NovelId,
            _draft: &NovelDraft,
        ) -> Result<Option<Novel>, RepositoryError> {
            Err(RepositoryError::Transport("connection refused".to_string()))
        }
        async fn delete(&self, _id: &NovelId) -> Result<bool, RepositoryError> {
            Err(RepositoryError::Transport("connection refused".to_string()))
        }
        async fn list_genres(&self) -> Result<Vec<Genre>, RepositoryError> {
            Err(RepositoryError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_read_failure_propagates_and_notifies() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = ListNovelsHandler::new(Arc::new(UnreachableRepository), notifier.clone());

        let err = handler.handle(ListNovels).await.unwrap_err();

        assert!(matches!(err, ApplicationError::RepositoryError(_)));
        assert_eq!(
            notifier.last(),
            Some(Notification::error(messages::NOVELS_FETCH_FAILED))
        );
    }
}
