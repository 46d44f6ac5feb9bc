// ==========================================
// VDC 运营看板 - 应用层
// ==========================================
// 职责: 组装存储、会话与 API，供宿主应用持有
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
