// ==========================================
// VDC 运营看板 - 运营概览
// ==========================================
// 订单状态计数 / 平均交付周期 / 笔记本利用率
// ==========================================

use crate::domain::inventory::InventoryItem;
use crate::domain::order::Order;
use crate::domain::types::status;
use crate::engine::metrics::{is_laptop, round_half_up};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsSummary {
    pub total_orders: usize,
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    /// 已签收且 days > 0 的平均天数（一位小数）
    pub avg_cycle_time_days: f64,
    pub assigned_laptops: usize,
    pub in_stock_laptops: usize,
    /// 已分配 ÷ (已分配 + 在库)，百分比取整
    pub laptop_utilization: i64,
}

pub fn operations_summary(orders: &[Order], items: &[InventoryItem]) -> OperationsSummary {
    let count = |expected: &str| orders.iter().filter(|o| status::is(&o.status, expected)).count();

    let cycle_days: Vec<i64> = orders
        .iter()
        .filter(|o| status::is(&o.status, status::DELIVERED) && o.days > 0)
        .map(|o| o.days)
        .collect();
    let avg_cycle_time_days = if cycle_days.is_empty() {
        0.0
    } else {
        let mean = cycle_days.iter().map(|&d| d as f64).sum::<f64>() / cycle_days.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let laptops: Vec<&InventoryItem> = items.iter().filter(|i| is_laptop(i)).collect();
    let assigned_laptops = laptops
        .iter()
        .filter(|i| status::is(&i.status, status::ASSIGNED))
        .count();
    let in_stock_laptops = laptops
        .iter()
        .filter(|i| status::is(&i.status, status::IN_STOCK))
        .count();
    let pool = assigned_laptops + in_stock_laptops;
    let laptop_utilization = if pool == 0 {
        0
    } else {
        round_half_up(assigned_laptops as f64 / pool as f64 * 100.0)
    };

    OperationsSummary {
        total_orders: orders.len(),
        pending: count(status::PENDING),
        processing: count(status::PROCESSING),
        shipped: count(status::SHIPPED),
        delivered: count(status::DELIVERED),
        avg_cycle_time_days,
        assigned_laptops,
        in_stock_laptops,
        laptop_utilization,
    }
}
