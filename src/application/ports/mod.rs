//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod document_extractor;
mod notifier;
mod repositories;

pub use document_extractor::{
    DocumentExtractorPort, DocumentFile, ExtractedDocument, ExtractionError,
};
pub use notifier::{messages, Notification, NotificationLevel, NotifierPort};
pub use repositories::{ChapterRepositoryPort, NovelRepositoryPort, RepositoryError};
