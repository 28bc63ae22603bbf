//! Remote Data Service Client - PostgREST 风格 REST 客户端
//!
//! 外部数据服务 API:
//! `{url}/rest/v1/{table}?{column}=eq.{value}&order=...`
//! 请求头: `apikey: {key}`、`Authorization: Bearer {key}`
//! 错误体: `{"code": "...", "message": "...", "details": ..., "hint": ...}`

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::RepositoryError;

/// 单行查询无结果时的错误码
pub const NO_ROWS_CODE: &str = "PGRST116";

const OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// 远程客户端配置
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 访问密钥
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl RemoteClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 服务端错误体
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// 远程数据服务客户端
pub struct RemoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    pub fn new(config: RemoteClientConfig) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// 多行查询
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RepositoryError> {
        tracing::debug!(table = %table, query = ?query, "Remote select");
        let response = self.send(self.request(Method::GET, table).query(query)).await?;
        decode(response).await
    }

    /// 单行查询；无结果时返回 None
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, RepositoryError> {
        tracing::debug!(table = %table, query = ?query, "Remote select single");
        let response = self
            .send(
                self.request(Method::GET, table)
                    .query(query)
                    .header(ACCEPT, OBJECT_MEDIA_TYPE),
            )
            .await?;

        match decode(response).await {
            Ok(row) => Ok(Some(row)),
            Err(RepositoryError::Service { code, .. }) if code == NO_ROWS_CODE => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 插入一行并返回服务端的记录
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, RepositoryError> {
        tracing::debug!(table = %table, "Remote insert");
        let response = self
            .send(
                self.request(Method::POST, table)
                    .header("Prefer", RETURN_REPRESENTATION)
                    .header(ACCEPT, OBJECT_MEDIA_TYPE)
                    .json(body),
            )
            .await?;
        decode(response).await
    }

    /// 按条件更新，返回被更新的行
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Vec<T>, RepositoryError> {
        tracing::debug!(table = %table, query = ?query, "Remote update");
        let response = self
            .send(
                self.request(Method::PATCH, table)
                    .query(query)
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(body),
            )
            .await?;
        decode(response).await
    }

    /// 按条件删除，返回被删除的行
    pub async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RepositoryError> {
        tracing::debug!(table = %table, query = ?query, "Remote delete");
        let response = self
            .send(
                self.request(Method::DELETE, table)
                    .query(query)
                    .header("Prefer", RETURN_REPRESENTATION),
            )
            .await?;
        decode(response).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RepositoryError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                RepositoryError::Transport("Remote data service timed out".to_string())
            } else if e.is_connect() {
                RepositoryError::Transport(format!("Cannot connect to remote data service: {}", e))
            } else {
                RepositoryError::Transport(e.to_string())
            }
        })
    }
}

/// 解析响应；非 2xx 转换为 Service 错误
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RepositoryError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RepositoryError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(service_error(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn service_error(status: u16, body: &str) -> RepositoryError {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(err) => {
            let mut message = err.message.unwrap_or_else(|| format!("HTTP {}", status));
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                message = format!("{} ({})", message, details);
            }
            if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                message = format!("{} hint: {}", message, hint);
            }
            RepositoryError::Service {
                code: err.code.unwrap_or_else(|| status.to_string()),
                message,
            }
        }
        Err(_) => RepositoryError::Service {
            code: status.to_string(),
            message: body.to_string(),
        },
    }
}

// ============================================================================
// 过滤条件
// ============================================================================

/// `column=eq.value`
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// 转义 LIKE 通配符
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `or=(title.ilike."*q*",description.ilike."*q*")`
pub fn text_search(query: &str, columns: &[&str]) -> String {
    let pattern = escape_like(query.trim())
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    let clauses: Vec<String> = columns
        .iter()
        .map(|column| format!("{}.ilike.\"*{}*\"", column, pattern))
        .collect();
    format!("({})", clauses.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client =
            RemoteClient::new(RemoteClientConfig::new("https://db.example.com/", "key")).unwrap();
        assert_eq!(
            client.table_url("novels"),
            "https://db.example.com/rest/v1/novels"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_text_search_clause() {
        assert_eq!(
            text_search(" dragon ", &["title", "description"]),
            "(title.ilike.\"*dragon*\",description.ilike.\"*dragon*\")"
        );
        assert_eq!(
            text_search("a\"b", &["title"]),
            "(title.ilike.\"*a\\\"b*\")"
        );
    }

    #[test]
    fn test_service_error_parsing() {
        let err = service_error(
            406,
            r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned","details":"The result contains 0 rows","hint":null}"#,
        );
        match err {
            RepositoryError::Service { code, message } => {
                assert_eq!(code, NO_ROWS_CODE);
                assert!(message.contains("0 rows"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        match service_error(502, "Bad Gateway") {
            RepositoryError::Service { code, message } => {
                assert_eq!(code, "502");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
