// ==========================================
// VDC 运营看板 - 指标引擎
// ==========================================
// 职责: 基于快照计算运营/财务指标
// 输入: DataSnapshot + MetricsContext（SLA 天数、参考日期）
// 红线: 无状态引擎，所有方法都是纯函数，不修改输入
//       天数差统一走 engine::calendar（ceil 毫秒差）
// ==========================================

pub mod operations;
pub mod rollup;
pub mod sla;
pub mod stock;
pub mod valuation;

pub use operations::OperationsSummary;
pub use rollup::{DeliveryMethodCounts, IssueCount, PeriodRollup, VolumeBucket};
pub use sla::SlaBreach;
pub use stock::{AgingBuckets, BurnRate, LowStockItem, ReturnsSummary};
pub use valuation::{FifoValuation, ItemValuation};

use crate::config::settings::{EngineThresholds, DEFAULT_SLA_DAYS};
use crate::domain::inventory::InventoryItem;
use crate::domain::snapshot::DataSnapshot;
use crate::domain::types::{Granularity, ReportPeriod};
use crate::engine::calendar::start_of_day;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// MetricsContext - 计算口径
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsContext {
    pub sla_days: u32,
    pub reference_date: NaiveDate,
}

impl MetricsContext {
    pub fn new(sla_days: u32, reference_date: NaiveDate) -> Self {
        Self {
            sla_days,
            reference_date,
        }
    }

    /// 以本地当天为参考日期
    pub fn today(sla_days: u32) -> Self {
        Self::new(sla_days, Local::now().date_naive())
    }

    pub fn reference_timestamp(&self) -> NaiveDateTime {
        start_of_day(self.reference_date)
    }
}

impl Default for MetricsContext {
    fn default() -> Self {
        Self::today(DEFAULT_SLA_DAYS)
    }
}

/// 百分比取整（.5 向上）
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// 笔记本判定（类型包含 laptop，忽略大小写）
pub(crate) fn is_laptop(item: &InventoryItem) -> bool {
    item.item_type.to_lowercase().contains("laptop")
}

// ==========================================
// MetricsEngine
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    thresholds: EngineThresholds,
}

impl MetricsEngine {
    pub fn new(thresholds: EngineThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &EngineThresholds {
        &self.thresholds
    }

    #[instrument(skip(self, snapshot), fields(orders = snapshot.orders.len()))]
    pub fn sla_breaches(&self, snapshot: &DataSnapshot, ctx: &MetricsContext) -> Vec<SlaBreach> {
        sla::sla_breaches(&snapshot.orders, ctx)
    }

    pub fn sla_compliance_rate(&self, snapshot: &DataSnapshot, ctx: &MetricsContext) -> i64 {
        sla::sla_compliance_rate(&snapshot.orders, ctx.sla_days)
    }

    pub fn burn_rate(&self, snapshot: &DataSnapshot, ctx: &MetricsContext) -> BurnRate {
        stock::burn_rate(
            &snapshot.orders,
            &snapshot.inventory.serialized,
            ctx,
            self.thresholds.depletion_sentinel_days,
        )
    }

    pub fn aging_buckets(&self, snapshot: &DataSnapshot, ctx: &MetricsContext) -> AgingBuckets {
        stock::aging_buckets(&snapshot.inventory.serialized, ctx)
    }

    pub fn returns_summary(&self, snapshot: &DataSnapshot) -> ReturnsSummary {
        stock::returns_summary(&snapshot.inventory.serialized)
    }

    pub fn low_stock(&self, snapshot: &DataSnapshot) -> Vec<LowStockItem> {
        stock::low_stock(&snapshot.inventory.bulk, self.thresholds.low_stock_threshold)
    }

    pub fn search_inventory<'a>(
        &self,
        snapshot: &'a DataSnapshot,
        query: &str,
    ) -> Vec<&'a InventoryItem> {
        stock::search_inventory(&snapshot.inventory.serialized, query)
    }

    #[instrument(skip(self, snapshot))]
    pub fn fifo_valuation(&self, snapshot: &DataSnapshot) -> FifoValuation {
        valuation::fifo_valuation(
            &snapshot.inventory.bulk,
            &snapshot.inventory.receive_log,
            &snapshot.financials,
        )
    }

    #[instrument(skip(self, snapshot, ctx))]
    pub fn period_rollup(
        &self,
        snapshot: &DataSnapshot,
        period: ReportPeriod,
        ctx: &MetricsContext,
    ) -> PeriodRollup {
        rollup::period_rollup(&snapshot.orders, &snapshot.financials, period, ctx)
    }

    pub fn trend_delta(&self, snapshot: &DataSnapshot) -> i64 {
        rollup::trend_delta(&snapshot.orders)
    }

    pub fn order_volume(&self, snapshot: &DataSnapshot, granularity: Granularity) -> Vec<VolumeBucket> {
        rollup::order_volume(&snapshot.orders, granularity)
    }

    pub fn operations_summary(&self, snapshot: &DataSnapshot) -> OperationsSummary {
        operations::operations_summary(&snapshot.orders, &snapshot.inventory.serialized)
    }
}
