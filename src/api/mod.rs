// ==========================================
// VDC 运营看板 - API 层
// ==========================================
// 职责: 导入会话、看板查询、设置更新，供宿主应用调用
// ==========================================

pub mod config_api;
pub mod dashboard_api;
pub mod error;
pub mod import_session;

// 重导出核心类型
pub use config_api::ConfigApi;
pub use dashboard_api::{DashboardApi, DashboardOverview};
pub use error::{ApiError, ApiResult};
pub use import_session::{CommitOutcome, ImportSession, SessionState};
