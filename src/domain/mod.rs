// ==========================================
// VDC 运营看板 - 领域模型层
// ==========================================
// 职责: 定义实体、原始表格结构与派生类型
// 红线: 实体之间不持有引用，关联一律按业务键
// ==========================================

pub mod allocation;
pub mod financial;
pub mod inventory;
pub mod order;
pub mod raw;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use allocation::{AllocationRecord, ClientRecord};
pub use financial::FinancialRecord;
pub use inventory::{BulkItem, Inventory, InventoryItem, ReceiveLogEntry};
pub use order::Order;
pub use raw::{CellValue, RawRow, Sheet, Workbook};
pub use snapshot::{DataSnapshot, SnapshotCounts};
pub use types::{DeliveryMethod, Granularity, IssueCategory, ReportPeriod};
