//! 测试辅助：记录通知、脚本化提取器、零延迟 Mock Store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::ports::{
    ChapterRepositoryPort, DocumentExtractorPort, DocumentFile, ExtractedDocument,
    ExtractionError, Notification, NotificationLevel, NotifierPort, NovelRepositoryPort,
};
use crate::infrastructure::memory::{
    MemoryChapterRepository, MemoryNovelRepository, MockLatency, MockStore,
};

/// 记录所有通知
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.all().pop()
    }

    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// 按文件名返回预设结果；未预设的文件按 UTF-8 解码
#[derive(Default)]
pub struct ScriptedExtractor {
    failures: HashMap<String, String>,
    warnings: HashMap<String, String>,
}

impl ScriptedExtractor {
    pub fn fail(mut self, file_name: &str, reason: &str) -> Self {
        self.failures
            .insert(file_name.to_string(), reason.to_string());
        self
    }

    pub fn warn(mut self, file_name: &str, warning: &str) -> Self {
        self.warnings
            .insert(file_name.to_string(), warning.to_string());
        self
    }
}

#[async_trait]
impl DocumentExtractorPort for ScriptedExtractor {
    async fn extract(&self, file: &DocumentFile) -> Result<ExtractedDocument, ExtractionError> {
        if let Some(reason) = self.failures.get(&file.file_name) {
            return Err(ExtractionError::ParseFailed {
                file_name: file.file_name.clone(),
                reason: reason.clone(),
            });
        }
        Ok(ExtractedDocument {
            content: String::from_utf8_lossy(&file.bytes).into_owned(),
            warning: self.warnings.get(&file.file_name).cloned(),
        })
    }
}

/// 基于零延迟 Mock Store 的仓储组合
pub struct Fixture {
    pub novels: Arc<dyn NovelRepositoryPort>,
    pub chapters: Arc<dyn ChapterRepositoryPort>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    pub fn seeded() -> Self {
        Self::with_store(MockStore::seeded(MockLatency::none()))
    }

    pub fn empty() -> Self {
        Self::with_store(MockStore::empty(MockLatency::none()))
    }

    fn with_store(store: MockStore) -> Self {
        let store = store.arc();
        Self {
            novels: Arc::new(MemoryNovelRepository::new(store.clone())),
            chapters: Arc::new(MemoryChapterRepository::new(store)),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn notifier(&self) -> Arc<dyn NotifierPort> {
        self.notifier.clone()
    }
}
