// ==========================================
// VDC 运营看板 - 库存指标
// ==========================================
// 消耗速率 / 库龄分布 / 退库统计 / 耗材低库存 / 资产检索
// ==========================================

use crate::domain::inventory::{BulkItem, InventoryItem};
use crate::domain::order::Order;
use crate::domain::types::status;
use crate::engine::calendar::{calendar_days_between, days_before, to_timestamp};
use crate::engine::metrics::{is_laptop, MetricsContext};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRate {
    /// 近 30 天日均订单数
    pub burn_rate: f64,
    /// 近 28 天周均订单数（取整）
    pub weekly_velocity: i64,
    pub in_stock_laptops: usize,
    pub days_to_depletion: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgingBuckets {
    #[serde(rename = "0-30")]
    pub days_0_30: usize,
    #[serde(rename = "31-60")]
    pub days_31_60: usize,
    #[serde(rename = "61-90")]
    pub days_61_90: usize,
    #[serde(rename = "90+")]
    pub days_90_plus: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsSummary {
    pub pending_wipe: usize,
    pub repair: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub name: String,
    pub stock: i64,
    pub received: i64,
    /// 在库 ÷ 累计入库（入库为 0 时为 0）
    pub stock_ratio: f64,
}

// 参考时刻前 n 天（含两端）内的订单数
fn orders_within(orders: &[Order], reference: NaiveDateTime, days: i64) -> usize {
    let start = days_before(reference, days);
    orders
        .iter()
        .filter_map(|o| to_timestamp(&o.date))
        .filter(|ts| *ts >= start && *ts <= reference)
        .count()
}

fn is_in_stock(item: &InventoryItem) -> bool {
    status::is(&item.status, status::IN_STOCK)
}

pub fn burn_rate(
    orders: &[Order],
    items: &[InventoryItem],
    ctx: &MetricsContext,
    sentinel_days: i64,
) -> BurnRate {
    let reference = ctx.reference_timestamp();
    let burn_rate = orders_within(orders, reference, 30) as f64 / 30.0;
    let weekly_velocity = (orders_within(orders, reference, 28) as f64 / 4.0).round() as i64;
    let in_stock_laptops = items
        .iter()
        .filter(|i| is_laptop(i) && is_in_stock(i))
        .count();

    let days_to_depletion = if burn_rate > 0.0 {
        (in_stock_laptops as f64 / burn_rate).floor() as i64
    } else {
        sentinel_days
    };

    BurnRate {
        burn_rate,
        weekly_velocity,
        in_stock_laptops,
        days_to_depletion,
    }
}

/// 在库资产按入库天数分桶（无入库日期的不计）
pub fn aging_buckets(items: &[InventoryItem], ctx: &MetricsContext) -> AgingBuckets {
    let reference = ctx.reference_timestamp();
    let mut buckets = AgingBuckets::default();

    for item in items.iter().filter(|i| is_in_stock(i)) {
        let Some(received) = to_timestamp(&item.received_date) else {
            continue;
        };
        match calendar_days_between(received, reference) {
            0..=30 => buckets.days_0_30 += 1,
            31..=60 => buckets.days_31_60 += 1,
            61..=90 => buckets.days_61_90 += 1,
            _ => buckets.days_90_plus += 1,
        }
    }

    buckets
}

/// 退库统计（状态文本精确匹配）
pub fn returns_summary(items: &[InventoryItem]) -> ReturnsSummary {
    ReturnsSummary {
        pending_wipe: items
            .iter()
            .filter(|i| i.status == status::RETURNED_PENDING_WIPE)
            .count(),
        repair: items
            .iter()
            .filter(|i| i.status == status::RETURNED_REPAIR)
            .count(),
    }
}

pub fn low_stock(bulk: &[BulkItem], threshold: i64) -> Vec<LowStockItem> {
    bulk.iter()
        .filter(|b| b.stock < threshold)
        .map(|b| LowStockItem {
            name: b.name.clone(),
            stock: b.stock,
            received: b.received,
            stock_ratio: if b.received > 0 {
                b.stock as f64 / b.received as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// 按类型/品牌/型号检索（忽略大小写，空查询返回全部）
pub fn search_inventory<'a>(items: &'a [InventoryItem], query: &str) -> Vec<&'a InventoryItem> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|i| {
            query.is_empty()
                || [&i.item_type, &i.brand, &i.model]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> MetricsContext {
        MetricsContext::new(5, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap())
    }

    fn laptop(serial: &str, item_status: &str, received: &str) -> InventoryItem {
        InventoryItem {
            serial_number: serial.to_string(),
            item_type: "Laptop - Standard".to_string(),
            status: item_status.to_string(),
            received_date: received.to_string(),
            ..Default::default()
        }
    }

    fn orders_on(dates: &[&str]) -> Vec<Order> {
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| Order {
                id: format!("R{}", i),
                date: d.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_burn_rate_and_depletion() {
        // 30 天窗口含 2025-03-01，28 天窗口不含
        let orders = orders_on(&["2025-03-01", "2025-03-10", "2025-03-31", "2025-01-01"]);
        let items = vec![
            laptop("A", "In Stock", ""),
            laptop("B", "in stock", ""),
            laptop("C", "Assigned", ""),
            InventoryItem {
                item_type: "Monitor".to_string(),
                status: "In Stock".to_string(),
                ..Default::default()
            },
        ];

        let rate = burn_rate(&orders, &items, &ctx(), 999);
        assert!((rate.burn_rate - 0.1).abs() < 1e-9);
        assert_eq!(rate.weekly_velocity, 1);
        assert_eq!(rate.in_stock_laptops, 2);
        assert_eq!(rate.days_to_depletion, 20);
    }

    #[test]
    fn test_depletion_sentinel_without_orders() {
        let rate = burn_rate(&[], &[laptop("A", "In Stock", "")], &ctx(), 999);
        assert_eq!(rate.burn_rate, 0.0);
        assert_eq!(rate.days_to_depletion, 999);
    }

    #[test]
    fn test_aging_bucket_boundaries() {
        let items = vec![
            laptop("A", "In Stock", "2025-03-01"), // 30
            laptop("B", "In Stock", "2025-02-28"), // 31
            laptop("C", "In Stock", "2024-12-31"), // 90
            laptop("D", "In Stock", "2024-12-30"), // 91
            laptop("E", "Assigned", "2024-12-30"),
            laptop("F", "In Stock", ""),
        ];

        let buckets = aging_buckets(&items, &ctx());
        assert_eq!(
            buckets,
            AgingBuckets {
                days_0_30: 1,
                days_31_60: 1,
                days_61_90: 1,
                days_90_plus: 1,
            }
        );
    }

    #[test]
    fn test_returns_require_exact_status() {
        let items = vec![
            laptop("A", "Returned - Pending Wipe", ""),
            laptop("B", "Returned - Repair", ""),
            laptop("C", "returned - repair", ""),
        ];
        assert_eq!(
            returns_summary(&items),
            ReturnsSummary {
                pending_wipe: 1,
                repair: 1,
            }
        );
    }

    #[test]
    fn test_low_stock_and_search() {
        let bulk = vec![
            BulkItem {
                name: "Webcam".to_string(),
                received: 500,
                shipped: 450,
                stock: 50,
            },
            BulkItem {
                name: "Headset".to_string(),
                received: 500,
                shipped: 100,
                stock: 400,
            },
        ];
        let low = low_stock(&bulk, 100);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].stock_ratio, 0.1);

        let items = vec![
            InventoryItem {
                brand: "Dell".to_string(),
                ..laptop("A", "In Stock", "")
            },
            InventoryItem {
                model: "ThinkPad".to_string(),
                item_type: "Laptop".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(search_inventory(&items, "dell").len(), 1);
        assert_eq!(search_inventory(&items, "LAPTOP").len(), 2);
        assert_eq!(search_inventory(&items, "").len(), 2);
    }
}
