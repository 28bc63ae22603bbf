//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ExtractionError, NotifierPort, RepositoryError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误（调用方在进入仓储前检测）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 仓储错误（传输 / 服务端失败）
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误（文档提取等）
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

/// 失败上报：记录错误日志并发出失败通知，返回转换后的应用层错误
pub fn report_failure(
    notifier: &dyn NotifierPort,
    message: &str,
    err: impl Into<ApplicationError>,
) -> ApplicationError {
    let err = err.into();
    tracing::error!(error = %err, "{}", message);
    notifier.error(message);
    err
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<ExtractionError> for ApplicationError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::Unsupported(_) | ExtractionError::ParseFailed { .. } => {
                Self::ValidationError(err.to_string())
            }
            ExtractionError::ServiceError(_) | ExtractionError::NetworkError(_) => {
                Self::ExternalServiceError(err.to_string())
            }
        }
    }
}
