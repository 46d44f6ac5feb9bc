// ==========================================
// VDC 运营看板 - 统计周期汇总 / 趋势 / 订单量分布
// ==========================================
// 周期: YTD（当年 1 月 1 日起）/ 近 30 天 / 近 90 天 / 全部
// 趋势: 最新订单时刻 L，本期 (L-30d, L]，上期 (L-60d, L-30d]
// 分布: 年 / 季 / 月 / 周（周日为一周起点）
// ==========================================

use crate::domain::financial::FinancialRecord;
use crate::domain::order::Order;
use crate::domain::types::{status, DeliveryMethod, Granularity, IssueCategory, ReportPeriod};
use crate::engine::calendar::{days_before, to_date, to_timestamp};
use crate::engine::metrics::{round_half_up, sla::sla_compliance_rate, MetricsContext};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeBucket {
    pub label: String,
    /// 桶起始日期（排序键）
    pub start: NaiveDate,
    pub orders: usize,
    pub delivered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCount {
    pub category: IssueCategory,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMethodCounts {
    pub direct: usize,
    pub pickup: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRollup {
    pub period: ReportPeriod,
    pub order_count: usize,
    pub order_buckets: Vec<VolumeBucket>,
    pub total_spend: f64,
    pub sla_compliance_rate: i64,
    /// 按优先级顺序，仅含出现过的分类
    pub issue_histogram: Vec<IssueCount>,
    pub delivery_methods: DeliveryMethodCounts,
}

/// 周期起始日（None 表示不限）
pub fn period_start(period: ReportPeriod, reference: NaiveDate) -> Option<NaiveDate> {
    match period {
        ReportPeriod::YearToDate => NaiveDate::from_ymd_opt(reference.year(), 1, 1),
        ReportPeriod::Last30Days => Some(reference - Duration::days(30)),
        ReportPeriod::Last90Days => Some(reference - Duration::days(90)),
        ReportPeriod::AllTime => None,
    }
}

fn in_period(date: &str, start: Option<NaiveDate>, reference: NaiveDate) -> bool {
    match start {
        None => true,
        Some(start) => to_date(date).is_some_and(|d| d >= start && d <= reference),
    }
}

pub fn period_rollup(
    orders: &[Order],
    financials: &[FinancialRecord],
    period: ReportPeriod,
    ctx: &MetricsContext,
) -> PeriodRollup {
    let start = period_start(period, ctx.reference_date);
    let orders: Vec<Order> = orders
        .iter()
        .filter(|o| in_period(&o.date, start, ctx.reference_date))
        .cloned()
        .collect();

    let total_spend = financials
        .iter()
        .filter(|f| in_period(&f.date, start, ctx.reference_date))
        .map(|f| f.total_cost)
        .sum();

    let granularity = match period {
        ReportPeriod::Last30Days => None,
        _ => Some(Granularity::Monthly),
    };
    let order_buckets = match granularity {
        Some(g) => order_volume(&orders, g),
        None => daily_volume(&orders),
    };

    let mut issue_counts: BTreeMap<IssueCategory, usize> = BTreeMap::new();
    let mut delivery_methods = DeliveryMethodCounts::default();
    for order in &orders {
        if let Some(issue) = order.issue {
            *issue_counts.entry(issue).or_default() += 1;
        }
        match order.delivery_method {
            DeliveryMethod::Direct => delivery_methods.direct += 1,
            DeliveryMethod::Pickup => delivery_methods.pickup += 1,
        }
    }

    PeriodRollup {
        period,
        order_count: orders.len(),
        order_buckets,
        total_spend,
        sla_compliance_rate: sla_compliance_rate(&orders, ctx.sla_days),
        issue_histogram: issue_counts
            .into_iter()
            .map(|(category, count)| IssueCount { category, count })
            .collect(),
        delivery_methods,
    }
}

/// 近 30 天订单量环比（百分比取整）
pub fn trend_delta(orders: &[Order]) -> i64 {
    let timestamps: Vec<_> = orders.iter().filter_map(|o| to_timestamp(&o.date)).collect();
    let Some(latest) = timestamps.iter().max().copied() else {
        return 0;
    };

    let current_start = days_before(latest, 30);
    let previous_start = days_before(latest, 60);
    let current = timestamps
        .iter()
        .filter(|t| **t > current_start && **t <= latest)
        .count();
    let previous = timestamps
        .iter()
        .filter(|t| **t > previous_start && **t <= current_start)
        .count();

    match (previous, current) {
        (0, 0) => 0,
        (0, _) => 100,
        (p, c) => round_half_up((c as f64 - p as f64) / p as f64 * 100.0),
    }
}

/// 订单量分布（桶起始日升序）
pub fn order_volume(orders: &[Order], granularity: Granularity) -> Vec<VolumeBucket> {
    bucketize(orders, |d| bucket_of(d, granularity))
}

fn daily_volume(orders: &[Order]) -> Vec<VolumeBucket> {
    bucketize(orders, |d| Some((d, d.format("%Y-%m-%d").to_string())))
}

fn bucketize<F>(orders: &[Order], key: F) -> Vec<VolumeBucket>
where
    F: Fn(NaiveDate) -> Option<(NaiveDate, String)>,
{
    let mut buckets: BTreeMap<NaiveDate, VolumeBucket> = BTreeMap::new();
    for order in orders {
        let Some((start, label)) = to_date(&order.date).and_then(&key) else {
            continue;
        };
        let bucket = buckets.entry(start).or_insert_with(|| VolumeBucket {
            label,
            start,
            orders: 0,
            delivered: 0,
        });
        bucket.orders += 1;
        if status::is(&order.status, status::DELIVERED) {
            bucket.delivered += 1;
        }
    }
    buckets.into_values().collect()
}

fn bucket_of(date: NaiveDate, granularity: Granularity) -> Option<(NaiveDate, String)> {
    match granularity {
        Granularity::Yearly => {
            NaiveDate::from_ymd_opt(date.year(), 1, 1).map(|s| (s, date.year().to_string()))
        }
        Granularity::Quarterly => {
            let quarter = date.month0() / 3;
            NaiveDate::from_ymd_opt(date.year(), quarter * 3 + 1, 1)
                .map(|s| (s, format!("{} Q{}", date.year(), quarter + 1)))
        }
        Granularity::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .map(|s| (s, s.format("%Y-%m").to_string())),
        Granularity::Weekly => {
            let offset = i64::from(date.weekday().num_days_from_sunday());
            let s = date - Duration::days(offset);
            Some((s, format!("{}/{}", s.month(), s.day())))
        }
    }
}
