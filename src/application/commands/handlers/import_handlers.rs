//! Document Import Handlers
//!
//! 文档经提取端口转换为纯文本后作为章节追加

use serde::Serialize;
use std::sync::Arc;

use super::chapter_handlers::ensure_novel;
use super::validation::validate_chapter;
use crate::application::commands::{BatchImportChapters, ImportChapter};
use crate::application::error::{report_failure, ApplicationError};
use crate::application::ports::{
    messages, ChapterRepositoryPort, DocumentExtractorPort, DocumentFile, ExtractedDocument,
    ExtractionError, NotifierPort, NovelRepositoryPort,
};
use crate::domain::chapter::{Chapter, ChapterDraft};

/// 导入结果
#[derive(Debug, Clone, Serialize)]
pub struct ImportedChapter {
    pub chapter: Chapter,
    /// 提取器给出的警告
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// 单个文件的批量导入结果
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ImportStatus {
    Imported {
        chapter: Chapter,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub file_name: String,
    #[serde(flatten)]
    pub status: ImportStatus,
}

/// 批量导入报告，顺序与输入文件一致
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchImportReport {
    pub outcomes: Vec<ImportOutcome>,
}

impl BatchImportReport {
    pub fn imported(&self) -> impl Iterator<Item = &Chapter> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            ImportStatus::Imported { chapter, .. } => Some(chapter),
            ImportStatus::Failed { .. } => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ImportStatus::Failed { .. }))
            .count()
    }
}

/// 提取结果转为章节表单；正文为空视为失败
fn to_draft(
    file: &DocumentFile,
    title: &str,
    extracted: Result<ExtractedDocument, ExtractionError>,
) -> Result<(ChapterDraft, Option<String>), ApplicationError> {
    let document = extracted?;
    if document.content.trim().is_empty() {
        return Err(ApplicationError::validation(format!(
            "{} contains no text",
            file.file_name
        )));
    }
    let draft = validate_chapter(&ChapterDraft::new(title, document.content))?;
    Ok((draft, document.warning))
}

// ============================================================================
// ImportChapter
// ============================================================================

/// ImportChapter Handler
pub struct ImportChapterHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    extractor: Arc<dyn DocumentExtractorPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl ImportChapterHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        extractor: Arc<dyn DocumentExtractorPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            novel_repo,
            chapter_repo,
            extractor,
            notifier,
        }
    }

    /// 提取失败时不创建任何章节
    pub async fn handle(&self, command: ImportChapter) -> Result<ImportedChapter, ApplicationError> {
        let ImportChapter {
            novel_id,
            file,
            title,
        } = command;

        ensure_novel(
            self.novel_repo.as_ref(),
            self.notifier.as_ref(),
            &novel_id,
            messages::CHAPTER_CREATE_FAILED,
        )
        .await?;

        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| file.stem());

        let extracted = self.extractor.extract(&file).await;
        let (draft, warning) = to_draft(&file, &title, extracted).map_err(|e| {
            tracing::warn!(file_name = %file.file_name, error = %e, "Document import failed");
            report_failure(self.notifier.as_ref(), messages::DOCUMENT_IMPORT_FAILED, e)
        })?;

        let chapter = self
            .chapter_repo
            .create(&novel_id, &draft)
            .await
            .map_err(|e| {
                report_failure(self.notifier.as_ref(), messages::CHAPTER_CREATE_FAILED, e)
            })?;

        tracing::info!(
            chapter_id = %chapter.id,
            novel_id = %novel_id,
            file_name = %file.file_name,
            order = chapter.order,
            warning = ?warning,
            "Chapter imported"
        );
        self.notifier.success(messages::CHAPTER_CREATED);

        Ok(ImportedChapter { chapter, warning })
    }
}

// ============================================================================
// BatchImportChapters
// ============================================================================

/// BatchImportChapters Handler
///
/// 逐个文件处理；单个文件提取失败只记入报告，仓储失败中止整个批次
pub struct BatchImportChaptersHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    extractor: Arc<dyn DocumentExtractorPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl BatchImportChaptersHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        extractor: Arc<dyn DocumentExtractorPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            novel_repo,
            chapter_repo,
            extractor,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        command: BatchImportChapters,
    ) -> Result<BatchImportReport, ApplicationError> {
        let BatchImportChapters { novel_id, files } = command;

        if files.is_empty() {
            return Err(ApplicationError::validation("No files provided"));
        }

        ensure_novel(
            self.novel_repo.as_ref(),
            self.notifier.as_ref(),
            &novel_id,
            messages::CHAPTER_CREATE_FAILED,
        )
        .await?;

        let extracted = self.extractor.extract_batch(&files).await;
        let mut report = BatchImportReport::default();

        for (file, result) in files.iter().zip(extracted) {
            let status = match to_draft(file, &file.stem(), result) {
                Ok((draft, warning)) => {
                    let chapter = self
                        .chapter_repo
                        .create(&novel_id, &draft)
                        .await
                        .map_err(|e| {
                            report_failure(
                                self.notifier.as_ref(),
                                messages::CHAPTER_CREATE_FAILED,
                                e,
                            )
                        })?;
                    tracing::debug!(
                        file_name = %file.file_name,
                        chapter_id = %chapter.id,
                        order = chapter.order,
                        "File imported"
                    );
                    ImportStatus::Imported { chapter, warning }
                }
                Err(e) => {
                    tracing::warn!(file_name = %file.file_name, error = %e, "File skipped");
                    ImportStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            report.outcomes.push(ImportOutcome {
                file_name: file.file_name.clone(),
                status,
            });
        }

        let failed = report.failed_count();
        tracing::info!(
            novel_id = %novel_id,
            files = files.len(),
            failed = failed,
            "Batch import finished"
        );
        if failed == 0 {
            self.notifier.success(messages::BATCH_IMPORT_COMPLETED);
        } else {
            self.notifier.error(messages::BATCH_IMPORT_PARTIAL);
        }

        Ok(report)
    }
}
