// ==========================================
// VDC 运营看板 - 键值存储
// ==========================================
// 职责: 持久化快照/设置的不透明键值存储
// 存储: config_kv 表（scope_id='global'）或内存
// 红线: 不含业务逻辑，值一律为字符串
// ==========================================

use crate::db::{ensure_config_kv_table, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// KeyValueStore Trait
// ==========================================
// 实现者: SqliteKvStore, MemoryKvStore
pub trait KeyValueStore: Send + Sync {
    /// 读取键值（不存在返回 None）
    fn get(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// 写入键值（覆盖）
    fn put(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// 删除键（不存在视为成功）
    fn remove(&self, key: &str) -> RepositoryResult<()>;
}

// ==========================================
// SqliteKvStore - SQLite 实现
// ==========================================
pub struct SqliteKvStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKvStore {
    /// 打开（或创建）数据库文件并确保 config_kv 表存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_config_kv_table(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
            ensure_config_kv_table(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "DELETE FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
        )?;
        Ok(())
    }
}

// ==========================================
// MemoryKvStore - 内存实现（测试/无盘环境）
// ==========================================
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> RepositoryResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sqlite_store_put_get_overwrite() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = SqliteKvStore::new(temp_file.path().to_str().unwrap()).unwrap();

        assert_eq!(store.get("vdc.settings").unwrap(), None);

        store.put("vdc.settings", r#"{"slaDays":5}"#).unwrap();
        assert_eq!(
            store.get("vdc.settings").unwrap().as_deref(),
            Some(r#"{"slaDays":5}"#)
        );

        store.put("vdc.settings", r#"{"slaDays":7}"#).unwrap();
        assert_eq!(
            store.get("vdc.settings").unwrap().as_deref(),
            Some(r#"{"slaDays":7}"#)
        );

        store.remove("vdc.settings").unwrap();
        assert_eq!(store.get("vdc.settings").unwrap(), None);
    }

    #[test]
    fn test_sqlite_store_survives_reopen() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        {
            let store = SqliteKvStore::new(&path).unwrap();
            store.put("k", "v").unwrap();
        }

        let store = SqliteKvStore::new(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKvStore::new();
        store.put("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }
}
