// ==========================================
// VDC 运营看板 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型，将导入/仓储/设置错误转换为用户可读的消息
// ==========================================

use crate::config::SettingsError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 持久化错误
    // ==========================================
    #[error("持久化失败: {0}")]
    PersistenceError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::LockError(msg) => {
                ApiError::InternalError(format!("存储锁获取失败: {}", msg))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
            other => ApiError::PersistenceError(other.to_string()),
        }
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::SlaDaysOutOfRange { .. } => ApiError::InvalidInput(err.to_string()),
            SettingsError::Repository(inner) => inner.into(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_maps_to_persistence() {
        let err: ApiError = RepositoryError::DatabaseQueryError("disk full".to_string()).into();
        assert!(matches!(err, ApiError::PersistenceError(msg) if msg.contains("disk full")));
    }

    #[test]
    fn test_sla_out_of_range_is_invalid_input() {
        let err: ApiError = SettingsError::SlaDaysOutOfRange {
            value: 45,
            min: 1,
            max: 30,
        }
        .into();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
