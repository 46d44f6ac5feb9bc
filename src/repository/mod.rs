// ==========================================
// VDC 运营看板 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 快照与设置的持久化，屏蔽存储细节
// ==========================================

pub mod error;
pub mod kv_store;
pub mod snapshot_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use snapshot_repo::SnapshotRepository;
