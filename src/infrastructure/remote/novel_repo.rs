//! Remote Novel Repository

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use super::client::{eq, text_search, RemoteClient};
use super::rows::{GenreInsert, GenreRow, GenreSnapshot, IdRow, NovelInsert, NovelPatch, NovelRow, GENRES, NOVELS};
use crate::application::ports::{NovelRepositoryPort, RepositoryError};
use crate::domain::novel::{
    resolve_genres, Genre, GenreResolution, Novel, NovelDraft, NovelFilter, NovelId,
};

/// 远程小说仓储
pub struct RemoteNovelRepository {
    client: Arc<RemoteClient>,
}

impl RemoteNovelRepository {
    pub fn new(client: Arc<RemoteClient>) -> Self {
        Self { client }
    }

    fn all_query() -> Vec<(&'static str, String)> {
        vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ]
    }

    /// 解析题材并写入新建的题材；写入失败的题材跳过
    async fn resolve(&self, names: &[String]) -> Result<Vec<Genre>, RepositoryError> {
        if names.iter().all(|n| n.trim().is_empty()) {
            return Ok(Vec::new());
        }

        let available = self.list_genres().await?;
        let GenreResolution { genres, created } = resolve_genres(names, &available);

        let mut skipped = Vec::new();
        for genre in &created {
            let insert = GenreInsert {
                id: genre.id.as_str(),
                name: &genre.name,
            };
            match self.client.insert::<_, GenreRow>(GENRES, &insert).await {
                Ok(_) => tracing::debug!(genre_id = %genre.id, name = %genre.name, "Genre created"),
                Err(e) => {
                    tracing::warn!(name = %genre.name, error = %e, "Failed to create genre, skipping");
                    skipped.push(genre.id.clone());
                }
            }
        }

        Ok(genres
            .into_iter()
            .filter(|g| !skipped.contains(&g.id))
            .collect())
    }
}

#[async_trait]
impl NovelRepositoryPort for RemoteNovelRepository {
    async fn find_all(&self) -> Result<Vec<Novel>, RepositoryError> {
        let rows: Vec<NovelRow> = self.client.select(NOVELS, &Self::all_query()).await?;
        Ok(rows.into_iter().map(Novel::from).collect())
    }

    async fn find_by_id(&self, id: &NovelId) -> Result<Option<Novel>, RepositoryError> {
        let row: Option<NovelRow> = self
            .client
            .select_single(NOVELS, &[("select", "*".to_string()), ("id", eq(id))])
            .await?;
        Ok(row.map(Novel::from))
    }

    async fn create(&self, draft: &NovelDraft) -> Result<Novel, RepositoryError> {
        let genres = self.resolve(&draft.genres).await?;
        let novel = Novel::new(draft, genres);

        let row: NovelRow = self
            .client
            .insert(NOVELS, &NovelInsert::from(&novel))
            .await?;
        Ok(Novel::from(row))
    }

    async fn update(
        &self,
        id: &NovelId,
        draft: &NovelDraft,
    ) -> Result<Option<Novel>, RepositoryError> {
        let exists: Option<IdRow> = self
            .client
            .select_single(NOVELS, &[("select", "id".to_string()), ("id", eq(id))])
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let genres = self.resolve(&draft.genres).await?;
        let patch = NovelPatch {
            title: &draft.title,
            description: &draft.description,
            image_url: &draft.image_url,
            genres: genres.iter().map(GenreSnapshot::from).collect(),
            updated_at: Utc::now(),
        };

        let rows: Vec<NovelRow> = self
            .client
            .update(NOVELS, &[("id", eq(id))], &patch)
            .await?;
        Ok(rows.into_iter().next().map(Novel::from))
    }

    async fn delete(&self, id: &NovelId) -> Result<bool, RepositoryError> {
        let rows: Vec<IdRow> = self.client.delete(NOVELS, &[("id", eq(id))]).await?;
        Ok(!rows.is_empty())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, RepositoryError> {
        let rows: Vec<GenreRow> = self
            .client
            .select(
                GENRES,
                &[("select", "id,name".to_string()), ("order", "name.asc".to_string())],
            )
            .await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn search(&self, filter: &NovelFilter) -> Result<Vec<Novel>, RepositoryError> {
        if filter.is_empty() {
            return self.find_all().await;
        }

        let mut query = Self::all_query();
        if !filter.query().is_empty() {
            query.push(("or", text_search(filter.query(), &["title", "description"])));
        }

        // 题材交集在本地过滤（题材是 JSON 列）
        let rows: Vec<NovelRow> = self.client.select(NOVELS, &query).await?;
        Ok(rows
            .into_iter()
            .map(Novel::from)
            .filter(|novel| filter.matches_genres(novel))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::GenreId;
    use crate::infrastructure::remote::fake::FakeRest;
    use axum::http::Method;
    use serde_json::{json, Value};

    fn novel_json(id: &str, title: &str, description: &str, genres: Value, day: u32) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": description,
            "image_url": "",
            "genres": genres,
            "created_at": format!("2024-01-{:02}T00:00:00+00:00", day),
            "updated_at": format!("2024-01-{:02}T00:00:00+00:00", day)
        })
    }

    async fn seeded() -> (FakeRest, RemoteNovelRepository) {
        let fantasy = json!({ "id": "g1", "name": "Fantasy" });
        let horror = json!({ "id": "g2", "name": "Horror" });
        let fake = FakeRest::start().await;
        fake.seed(
            NOVELS,
            vec![
                novel_json("n1", "Alpha", "A dragon tale", json!([fantasy]), 1),
                novel_json("n2", "Beta", "Another DRAGON story", json!([fantasy, horror]), 2),
                // 题材以 JSON 字符串存储
                novel_json(
                    "n3",
                    "Gamma",
                    "Space opera",
                    json!(r#"[{"id":"g1","name":"Fantasy"},{"id":"g2","name":"Horror"}]"#),
                    3,
                ),
            ],
        );
        let repo = RemoteNovelRepository::new(fake.client());
        (fake, repo)
    }

    fn ids(novels: &[Novel]) -> Vec<&str> {
        novels.iter().map(|n| n.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_search_text_on_server_and_genres_locally() {
        let (fake, repo) = seeded().await;
        let filter = NovelFilter::new(
            " dragon ",
            vec![GenreId::from("g1"), GenreId::from("g2")],
        );

        let found = repo.search(&filter).await.unwrap();
        assert_eq!(ids(&found), vec!["n2"]);

        let requests = fake.requests(Method::GET, NOVELS);
        let params = requests.last().unwrap();
        assert!(params.contains(&(
            "or".to_string(),
            "(title.ilike.\"*dragon*\",description.ilike.\"*dragon*\")".to_string()
        )));
    }

    #[tokio::test]
    async fn test_search_by_genres_only() {
        let (fake, repo) = seeded().await;
        let filter = NovelFilter::new("", vec![GenreId::from("g2")]);

        let found = repo.search(&filter).await.unwrap();
        assert_eq!(ids(&found), vec!["n3", "n2"]);

        let requests = fake.requests(Method::GET, NOVELS);
        assert!(requests.last().unwrap().iter().all(|(key, _)| key != "or"));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let (_fake, repo) = seeded().await;

        let novel = repo.find_by_id(&NovelId::from("n3")).await.unwrap().unwrap();
        assert_eq!(novel.title, "Gamma");
        assert_eq!(novel.genres.len(), 2);

        assert!(repo
            .find_by_id(&NovelId::from("missing"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_service_failure_is_reported() {
        let (fake, repo) = seeded().await;
        fake.fail(Method::GET, NOVELS, "id");

        match repo.find_by_id(&NovelId::from("n1")).await {
            Err(RepositoryError::Service { code, message }) => {
                assert_eq!(code, "XX000");
                assert_eq!(message, "storage offline");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let (fake, repo) = seeded().await;

        assert!(repo.delete(&NovelId::from("n1")).await.unwrap());
        assert!(!repo.delete(&NovelId::from("n1")).await.unwrap());
        assert_eq!(fake.rows(NOVELS).len(), 2);
    }
}
