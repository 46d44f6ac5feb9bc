// ==========================================
// VDC 运营看板 - 核心库
// ==========================================
// 系统定位: 硬件配发运营看板的数据对账与指标引擎
// 技术栈: Rust + SQLite（键值快照）
// 数据流: 表格字节 → 解码 → 解析 → 关联合并 → 指标
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 快照与设置持久化
pub mod repository;

// 引擎层 - 分类、合并、指标
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 看板设置与列名候选
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 宿主集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DeliveryMethod, Granularity, IssueCategory, ReportPeriod};

// 领域实体
pub use domain::{
    AllocationRecord, BulkItem, CellValue, ClientRecord, DataSnapshot, FinancialRecord,
    Inventory, InventoryItem, Order, RawRow, ReceiveLogEntry, Workbook,
};

// 引擎
pub use engine::{CrossReferenceMerger, MetricsContext, MetricsEngine};

// 导入
pub use importer::{ImportPreview, WorkbookDecoder, WorkbookImporter};

// API
pub use api::{ApiError, ApiResult, DashboardApi, ImportSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "VDC 运营看板";
