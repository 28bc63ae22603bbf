//! HTTP Document Extractor - 调用外部文档解析服务
//!
//! 外部解析 API:
//! POST {url}/extract  (multipart, 字段 `file`)
//! Response: {"content": "...", "warning": "..." | null}
//!
//! 纯文本文档在本地解码，不经过外部服务

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::PlainTextExtractor;
use crate::application::ports::{
    DocumentExtractorPort, DocumentFile, ExtractedDocument, ExtractionError,
};

/// 解析服务响应
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    content: String,
    #[serde(default)]
    warning: Option<String>,
}

/// HTTP 提取器配置
#[derive(Debug, Clone)]
pub struct HttpExtractorConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl HttpExtractorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 60,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 文档提取器
pub struct HttpDocumentExtractor {
    client: Client,
    config: HttpExtractorConfig,
    plain_text: PlainTextExtractor,
}

impl HttpDocumentExtractor {
    pub fn new(config: HttpExtractorConfig) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtractionError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            plain_text: PlainTextExtractor::new(),
        })
    }

    fn extract_url(&self) -> String {
        format!("{}/extract", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl DocumentExtractorPort for HttpDocumentExtractor {
    async fn extract(&self, file: &DocumentFile) -> Result<ExtractedDocument, ExtractionError> {
        if PlainTextExtractor::supports(file) {
            return self.plain_text.extract(file).await;
        }

        tracing::debug!(
            url = %self.extract_url(),
            file_name = %file.file_name,
            size = file.bytes.len(),
            "Sending document to extraction service"
        );

        let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.extract_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::NetworkError("Extraction service timed out".to_string())
                } else if e.is_connect() {
                    ExtractionError::NetworkError(format!(
                        "Cannot connect to extraction service: {}",
                        e
                    ))
                } else {
                    ExtractionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let reason = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ParseFailed {
                file_name: file.file_name.clone(),
                reason,
            });
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::ServiceError(format!("Invalid response: {}", e)))?;

        tracing::info!(
            file_name = %file.file_name,
            chars = body.content.chars().count(),
            warning = ?body.warning,
            "Document extracted"
        );

        Ok(ExtractedDocument {
            content: body.content,
            warning: body.warning.filter(|w| !w.trim().is_empty()),
        })
    }
}
