//! Import HTTP Handlers - 文档上传导入章节

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    BatchImportChapters, BatchImportReport, DocumentFile, ImportChapter, ImportedChapter,
};
use crate::domain::novel::NovelId;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 解析后的上传表单
#[derive(Debug, Default)]
struct ImportForm {
    novel_id: Option<NovelId>,
    title: Option<String>,
    files: Vec<DocumentFile>,
}

impl ImportForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
        })? {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "novelId" => {
                    let id = read_text(field, "novelId").await?;
                    form.novel_id = Some(NovelId::from(id.trim()));
                }
                "title" => {
                    let title = read_text(field, "title").await?;
                    form.title = Some(title).filter(|t| !t.trim().is_empty());
                }
                "file" => {
                    let file_name = field
                        .file_name()
                        .map(|s| s.to_string())
                        .ok_or_else(|| ApiError::BadRequest("File name is required".to_string()))?;
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                    form.files.push(DocumentFile::new(file_name, bytes.to_vec()));
                }
                other => {
                    tracing::debug!(field = %other, "Ignoring unknown multipart field");
                }
            }
        }

        Ok(form)
    }

    fn novel_id(&mut self) -> Result<NovelId, ApiError> {
        self.novel_id
            .take()
            .filter(|id| !id.as_str().is_empty())
            .ok_or_else(|| ApiError::BadRequest("novelId is required".to_string()))
    }
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))
}

/// 导入单个文档为章节
pub async fn import_chapter(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportedChapter>>, ApiError> {
    let mut form = ImportForm::read(multipart).await?;
    let novel_id = form.novel_id()?;

    if form.files.len() > 1 {
        return Err(ApiError::BadRequest(
            "Only one file is allowed, use import_batch for multiple files".to_string(),
        ));
    }
    let file = form
        .files
        .pop()
        .ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;

    let imported = state
        .import_chapter_handler
        .handle(ImportChapter {
            novel_id,
            file,
            title: form.title,
        })
        .await?;
    Ok(Json(ApiResponse::success(imported)))
}

/// 批量导入，每个文件一章
pub async fn import_chapters_batch(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<BatchImportReport>>, ApiError> {
    let mut form = ImportForm::read(multipart).await?;
    let novel_id = form.novel_id()?;

    let report = state
        .batch_import_handler
        .handle(BatchImportChapters {
            novel_id,
            files: form.files,
        })
        .await?;
    Ok(Json(ApiResponse::success(report)))
}
