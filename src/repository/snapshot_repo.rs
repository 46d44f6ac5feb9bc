// ==========================================
// VDC 运营看板 - 快照仓储
// ==========================================
// 职责: 数据快照与看板设置的 JSON 序列化读写
// 键: vdc.snapshot / vdc.settings
// ==========================================

use crate::config::config_keys;
use crate::config::DashboardSettings;
use crate::domain::snapshot::DataSnapshot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::kv_store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SnapshotRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SnapshotRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 读取已提交快照（未保存过返回 None）
    pub fn load_snapshot(&self) -> RepositoryResult<Option<DataSnapshot>> {
        self.read_json(config_keys::SNAPSHOT)
    }

    /// 写入快照（整体覆盖）
    pub fn save_snapshot(&self, snapshot: &DataSnapshot) -> RepositoryResult<()> {
        self.write_json(config_keys::SNAPSHOT, snapshot)?;
        debug!(counts = ?snapshot.counts(), "快照已持久化");
        Ok(())
    }

    /// 读取看板设置（未保存过返回默认值；越界值收敛到允许范围）
    pub fn load_settings(&self) -> RepositoryResult<DashboardSettings> {
        let settings: Option<DashboardSettings> = self.read_json(config_keys::SETTINGS)?;
        Ok(settings.unwrap_or_default().normalized())
    }

    pub fn save_settings(&self, settings: &DashboardSettings) -> RepositoryResult<()> {
        self.write_json(config_keys::SETTINGS, settings)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> RepositoryResult<Option<T>> {
        let raw = match self.store.get(key)? {
            Some(v) => v,
            None => return Ok(None),
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            warn!(key = key, error = %e, "持久化内容无法解析");
            RepositoryError::SerializationError {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> RepositoryResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| RepositoryError::SerializationError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.put(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::Order;
    use crate::repository::kv_store::MemoryKvStore;

    #[test]
    fn test_snapshot_round_trip_through_store() {
        let repo = SnapshotRepository::new(Arc::new(MemoryKvStore::new()));
        assert!(repo.load_snapshot().unwrap().is_none());

        let snapshot = DataSnapshot {
            orders: vec![Order {
                id: "RITM1".to_string(),
                date: "2025-02-01".to_string(),
                status: "Processing".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        repo.save_snapshot(&snapshot).unwrap();

        assert_eq!(repo.load_snapshot().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let store = Arc::new(MemoryKvStore::new());
        store.put(config_keys::SNAPSHOT, "{not json").unwrap();

        let repo = SnapshotRepository::new(store);
        assert!(matches!(
            repo.load_snapshot(),
            Err(RepositoryError::SerializationError { .. })
        ));
    }

    #[test]
    fn test_settings_default_when_absent() {
        let repo = SnapshotRepository::new(Arc::new(MemoryKvStore::new()));
        assert_eq!(repo.load_settings().unwrap(), DashboardSettings::default());
    }
}
