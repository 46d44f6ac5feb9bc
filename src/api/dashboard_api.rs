// ==========================================
// VDC 运营看板 - 看板 API
// ==========================================
// 职责: 将指标引擎结果聚合为渲染层所需的单一载荷
// 架构: API 层 → MetricsEngine（纯函数）
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::inventory::InventoryItem;
use crate::domain::snapshot::{DataSnapshot, SnapshotCounts};
use crate::domain::types::{Granularity, ReportPeriod};
use crate::engine::metrics::{
    AgingBuckets, BurnRate, FifoValuation, LowStockItem, OperationsSummary, PeriodRollup,
    ReturnsSummary, SlaBreach, VolumeBucket,
};
use crate::engine::{MetricsContext, MetricsEngine};

// ==========================================
// DashboardOverview - 看板总览载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub context: MetricsContext,
    pub counts: SnapshotCounts,
    pub operations: OperationsSummary,
    pub sla_breaches: Vec<SlaBreach>,
    pub burn_rate: BurnRate,
    pub aging: AgingBuckets,
    pub returns: ReturnsSummary,
    pub valuation: FifoValuation,
    pub low_stock: Vec<LowStockItem>,
    pub rollup: PeriodRollup,
    pub trend_delta: i64,
    pub order_volume: Vec<VolumeBucket>,
}

// ==========================================
// DashboardApi
// ==========================================
#[derive(Debug, Default)]
pub struct DashboardApi {
    engine: MetricsEngine,
}

impl DashboardApi {
    pub fn new(engine: MetricsEngine) -> Self {
        Self { engine }
    }

    /// 看板总览
    ///
    /// # 参数
    /// - snapshot: 已提交快照
    /// - ctx: SLA 天数与参考日期
    /// - period: 统计周期（汇总卡片）
    /// - granularity: 订单量分布粒度（趋势图）
    #[instrument(skip(self, snapshot, ctx))]
    pub fn overview(
        &self,
        snapshot: &DataSnapshot,
        ctx: &MetricsContext,
        period: ReportPeriod,
        granularity: Granularity,
    ) -> DashboardOverview {
        DashboardOverview {
            context: *ctx,
            counts: snapshot.counts(),
            operations: self.engine.operations_summary(snapshot),
            sla_breaches: self.engine.sla_breaches(snapshot, ctx),
            burn_rate: self.engine.burn_rate(snapshot, ctx),
            aging: self.engine.aging_buckets(snapshot, ctx),
            returns: self.engine.returns_summary(snapshot),
            valuation: self.engine.fifo_valuation(snapshot),
            low_stock: self.engine.low_stock(snapshot),
            rollup: self.engine.period_rollup(snapshot, period, ctx),
            trend_delta: self.engine.trend_delta(snapshot),
            order_volume: self.engine.order_volume(snapshot, granularity),
        }
    }

    /// 资产检索（类型/品牌/型号）
    pub fn search_inventory(&self, snapshot: &DataSnapshot, query: &str) -> Vec<InventoryItem> {
        self.engine
            .search_inventory(snapshot, query)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::Order;
    use chrono::NaiveDate;

    #[test]
    fn test_overview_on_empty_snapshot() {
        let ctx = MetricsContext::new(5, NaiveDate::from_ymd_opt(2025, 2, 20).unwrap());
        let overview = DashboardApi::default().overview(
            &DataSnapshot::default(),
            &ctx,
            ReportPeriod::AllTime,
            Granularity::Monthly,
        );

        assert!(overview.sla_breaches.is_empty());
        assert_eq!(overview.burn_rate.days_to_depletion, 999);
        assert_eq!(overview.rollup.sla_compliance_rate, 100);
        assert_eq!(overview.trend_delta, 0);
        assert_eq!(overview.valuation.total_units, 0);
    }

    #[test]
    fn test_overview_includes_breaches() {
        let ctx = MetricsContext::new(5, NaiveDate::from_ymd_opt(2025, 2, 20).unwrap());
        let snapshot = DataSnapshot {
            orders: vec![Order {
                id: "R1".to_string(),
                date: "2025-02-01".to_string(),
                status: "Processing".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let overview =
            DashboardApi::default().overview(&snapshot, &ctx, ReportPeriod::YearToDate, Granularity::Weekly);
        assert_eq!(overview.sla_breaches[0].age_days, 19);
        assert_eq!(overview.operations.processing, 1);
        assert_eq!(overview.rollup.order_count, 1);
        assert_eq!(overview.order_volume.len(), 1);

        let json = serde_json::to_value(&overview).unwrap();
        assert!(json["slaBreaches"].is_array());
        assert_eq!(json["aging"]["90+"], 0);
    }
}
