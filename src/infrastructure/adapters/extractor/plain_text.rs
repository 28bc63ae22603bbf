//! Plain Text Extractor - 本地纯文本文档提取
//!
//! 支持 UTF-8 编码的 `.txt` / `.md`，去掉 BOM，统一换行符

use async_trait::async_trait;

use crate::application::ports::{
    DocumentExtractorPort, DocumentFile, ExtractedDocument, ExtractionError,
};

/// 支持的扩展名
pub const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "text"];

/// 纯文本提取器
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 是否由本地提取器处理
    pub fn supports(file: &DocumentFile) -> bool {
        file.extension()
            .is_some_and(|ext| PLAIN_TEXT_EXTENSIONS.contains(&ext.as_str()))
    }

    fn decode(file: &DocumentFile) -> Result<ExtractedDocument, ExtractionError> {
        let text = std::str::from_utf8(&file.bytes).map_err(|e| ExtractionError::ParseFailed {
            file_name: file.file_name.clone(),
            reason: format!("not valid UTF-8 text ({})", e),
        })?;

        let content = text
            .strip_prefix('\u{feff}')
            .unwrap_or(text)
            .replace("\r\n", "\n");

        Ok(ExtractedDocument::new(content))
    }
}

#[async_trait]
impl DocumentExtractorPort for PlainTextExtractor {
    async fn extract(&self, file: &DocumentFile) -> Result<ExtractedDocument, ExtractionError> {
        if !Self::supports(file) {
            return Err(ExtractionError::Unsupported(format!(
                "{} (only .txt and .md documents can be imported without an extraction service)",
                file.file_name
            )));
        }

        let document = Self::decode(file)?;
        tracing::debug!(
            file_name = %file.file_name,
            chars = document.content.chars().count(),
            "Plain text document extracted"
        );
        Ok(document)
    }
}
