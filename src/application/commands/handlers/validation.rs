//! 表单校验
//!
//! 在调用仓储之前执行；返回规范化后的表单

use crate::application::error::ApplicationError;
use crate::domain::chapter::ChapterDraft;
use crate::domain::novel::{NovelDraft, Title};

fn required(value: &str, message: &str) -> Result<String, ApplicationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApplicationError::validation(message));
    }
    Ok(trimmed.to_string())
}

fn title(value: &str) -> Result<String, ApplicationError> {
    Title::new(value)
        .map(Title::into_inner)
        .map_err(ApplicationError::validation)
}

/// 标题、简介、封面 URL 必填
pub fn validate_novel(draft: &NovelDraft) -> Result<NovelDraft, ApplicationError> {
    Ok(NovelDraft {
        title: title(&draft.title)?,
        description: required(&draft.description, "Description is required")?,
        image_url: required(&draft.image_url, "Image URL is required")?,
        genres: draft.genres.clone(),
    })
}

/// 标题、正文必填；正文保留原样
pub fn validate_chapter(draft: &ChapterDraft) -> Result<ChapterDraft, ApplicationError> {
    if draft.content.trim().is_empty() {
        return Err(ApplicationError::validation("Content is required"));
    }
    Ok(ChapterDraft {
        title: title(&draft.title)?,
        content: draft.content.clone(),
    })
}
