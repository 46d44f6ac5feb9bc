// ==========================================
// VDC 运营看板 - 配置层
// ==========================================
// 职责: 看板设置、引擎阈值、列名候选清单
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod field_aliases;
pub mod settings;

// 重导出
pub use config_manager::{config_keys, SettingsError, SettingsManager};
pub use field_aliases::FIELD_ALIAS_VERSION;
pub use settings::{DashboardSettings, EngineThresholds, DEFAULT_SLA_DAYS};
