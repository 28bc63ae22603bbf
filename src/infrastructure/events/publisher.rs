//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现；同时作为用户通知的默认出口

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::{Notification, NotificationLevel, NotifierPort};

/// 广播通道容量
const CHANNEL_CAPACITY: usize = 100;

/// WebSocket 事件类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 用户通知（成功 / 失败提示）
    Notification {
        level: NotificationLevel,
        message: String,
    },
}

impl From<Notification> for WsEvent {
    fn from(notification: Notification) -> Self {
        WsEvent::Notification {
            level: notification.level,
            message: notification.message,
        }
    }
}

/// 事件发布器
pub struct EventPublisher {
    global_channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (global_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            global_channel: global_tx,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅全局事件
    pub fn subscribe_global(&self) -> broadcast::Receiver<WsEvent> {
        self.global_channel.subscribe()
    }

    /// 当前订阅者数量
    pub fn receiver_count(&self) -> usize {
        self.global_channel.receiver_count()
    }

    /// 发布事件（全局广播）
    pub fn publish(&self, event: WsEvent) {
        if let Err(e) = self.global_channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifierPort for EventPublisher {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(message = %notification.message, "Notification")
            }
            NotificationLevel::Error => {
                tracing::warn!(message = %notification.message, "Notification")
            }
        }
        self.publish(notification.into());
    }
}
