// ==========================================
// VDC 运营看板 - 引擎层
// ==========================================
// 职责: 分类规则、交叉关联合并、指标计算
// 红线: 引擎无状态，不做 I/O，快照以参数传入
// ==========================================

pub mod calendar;
pub mod classification;
pub mod merger;
pub mod metrics;

// 重导出核心引擎
pub use classification::{classify_delivery_method, classify_issue};
pub use merger::CrossReferenceMerger;
pub use metrics::{MetricsContext, MetricsEngine};
