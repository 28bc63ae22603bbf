//! Document Extractor Port - 文档文本提取抽象
//!
//! 上传的文档（docx / txt 等）交给外部提取器转换为纯文本，
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 文档提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported document: {0}")]
    Unsupported(String),

    #[error("Failed to parse {file_name}: {reason}")]
    ParseFailed { file_name: String, reason: String },

    #[error("Extraction service error: {0}")]
    ServiceError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// 上传的文档
#[derive(Debug, Clone)]
pub struct DocumentFile {
    /// 原始文件名（含扩展名）
    pub file_name: String,
    /// 文件字节
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// 去掉扩展名的文件名，作为默认章节标题
    pub fn stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.file_name.clone())
    }

    /// 小写扩展名
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
    }
}

/// 提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// 纯文本内容
    pub content: String,
    /// 提取器给出的第一条警告
    pub warning: Option<String>,
}

impl ExtractedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            warning: None,
        }
    }
}

/// Document Extractor Port
#[async_trait]
pub trait DocumentExtractorPort: Send + Sync {
    /// 提取单个文档
    async fn extract(&self, file: &DocumentFile) -> Result<ExtractedDocument, ExtractionError>;

    /// 批量提取；每个输入对应一个结果，保持输入顺序，单个失败不影响其他文件
    async fn extract_batch(
        &self,
        files: &[DocumentFile],
    ) -> Vec<Result<ExtractedDocument, ExtractionError>> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(self.extract(file).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_strips_extension() {
        let file = DocumentFile::new("Chapter 1 - The Beginning.docx", vec![]);
        assert_eq!(file.stem(), "Chapter 1 - The Beginning");
        assert_eq!(file.extension().as_deref(), Some("docx"));
    }

    #[test]
    fn test_stem_without_extension() {
        let file = DocumentFile::new("prologue", vec![]);
        assert_eq!(file.stem(), "prologue");
        assert!(file.extension().is_none());
    }
}
