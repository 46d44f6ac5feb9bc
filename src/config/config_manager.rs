// ==========================================
// VDC 运营看板 - 设置管理器
// ==========================================
// 职责: 看板设置的加载、校验与覆写
// 存储: config_kv 表（key = vdc.settings）
// ==========================================

use crate::config::settings::{DashboardSettings, SLA_DAYS_MAX, SLA_DAYS_MIN};
use crate::repository::{KeyValueStore, RepositoryResult, SnapshotRepository};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 已提交数据快照 {orders, inventory, financials, allocation, client}
    pub const SNAPSHOT: &str = "vdc.snapshot";
    /// 看板设置 {slaDays, customLogo}
    pub const SETTINGS: &str = "vdc.settings";
}

/// 设置更新错误
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("SLA 天数超出范围: {value}（允许 {min}-{max}）")]
    SlaDaysOutOfRange { value: u32, min: u32, max: u32 },

    #[error(transparent)]
    Repository(#[from] crate::repository::RepositoryError),
}

// ==========================================
// SettingsManager - 设置管理器
// ==========================================
pub struct SettingsManager {
    repo: SnapshotRepository,
    current: DashboardSettings,
}

impl SettingsManager {
    /// 启动时读取一次设置
    pub fn load(store: Arc<dyn KeyValueStore>) -> RepositoryResult<Self> {
        let repo = SnapshotRepository::new(store);
        let current = repo.load_settings()?;
        info!(sla_days = current.sla_days, "看板设置已加载");
        Ok(Self { repo, current })
    }

    pub fn current(&self) -> &DashboardSettings {
        &self.current
    }

    pub fn sla_days(&self) -> u32 {
        self.current.sla_days
    }

    /// 更新 SLA 天数（校验范围后持久化）
    pub fn set_sla_days(&mut self, days: u32) -> Result<(), SettingsError> {
        if !DashboardSettings::is_valid_sla_days(days) {
            return Err(SettingsError::SlaDaysOutOfRange {
                value: days,
                min: SLA_DAYS_MIN,
                max: SLA_DAYS_MAX,
            });
        }
        let mut next = self.current.clone();
        next.sla_days = days;
        self.persist(next)
    }

    /// 更新自定义 Logo（None 为清除）
    pub fn set_custom_logo(&mut self, logo: Option<String>) -> Result<(), SettingsError> {
        let mut next = self.current.clone();
        next.custom_logo = logo.filter(|l| !l.trim().is_empty());
        self.persist(next)
    }

    // 先落盘，成功后再替换内存值
    fn persist(&mut self, next: DashboardSettings) -> Result<(), SettingsError> {
        self.repo.save_settings(&next)?;
        info!(sla_days = next.sla_days, "看板设置已更新");
        self.current = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryKvStore;

    #[test]
    fn test_set_sla_days_persists() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        let mut manager = SettingsManager::load(store.clone()).unwrap();
        assert_eq!(manager.sla_days(), 5);

        manager.set_sla_days(10).unwrap();

        let reloaded = SettingsManager::load(store).unwrap();
        assert_eq!(reloaded.sla_days(), 10);
    }

    #[test]
    fn test_set_sla_days_rejects_out_of_range() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        let mut manager = SettingsManager::load(store).unwrap();

        assert!(matches!(
            manager.set_sla_days(0),
            Err(SettingsError::SlaDaysOutOfRange { .. })
        ));
        assert!(manager.set_sla_days(31).is_err());
        assert_eq!(manager.sla_days(), 5);
    }

    #[test]
    fn test_blank_logo_is_cleared() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        let mut manager = SettingsManager::load(store).unwrap();

        manager.set_custom_logo(Some("data:image/png;base64,AAA".to_string())).unwrap();
        assert!(manager.current().custom_logo.is_some());

        manager.set_custom_logo(Some("   ".to_string())).unwrap();
        assert!(manager.current().custom_logo.is_none());
    }
}
