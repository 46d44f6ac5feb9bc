// ==========================================
// VDC 运营看板 - SLA 超期与达标率
// ==========================================
// 超期: 未签收 且 订单日期不晚于参考日 且 账龄 > SLA 天数（严格大于）
// 达标: 已签收订单中 days <= SLA 天数 的占比
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::status;
use crate::engine::calendar::{calendar_days_between, to_timestamp};
use crate::engine::metrics::{round_half_up, MetricsContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaBreach {
    pub order_id: String,
    pub status: String,
    pub date: String,
    pub recipient_name: String,
    pub age_days: i64,
}

/// 超期订单，按账龄降序（同龄保持输入顺序）
pub fn sla_breaches(orders: &[Order], ctx: &MetricsContext) -> Vec<SlaBreach> {
    let reference = ctx.reference_timestamp();
    let sla_days = i64::from(ctx.sla_days);

    let mut breaches: Vec<SlaBreach> = orders
        .iter()
        .filter(|o| !status::is(&o.status, status::DELIVERED))
        .filter_map(|o| {
            let placed = to_timestamp(&o.date)?;
            if placed > reference {
                return None;
            }
            let age_days = calendar_days_between(placed, reference);
            (age_days > sla_days).then(|| SlaBreach {
                order_id: o.id.clone(),
                status: o.status.clone(),
                date: o.date.clone(),
                recipient_name: o.recipient_name.clone(),
                age_days,
            })
        })
        .collect();

    breaches.sort_by(|a, b| b.age_days.cmp(&a.age_days));
    breaches
}

/// SLA 达标率（百分比取整，无已签收订单时为 100）
pub fn sla_compliance_rate(orders: &[Order], sla_days: u32) -> i64 {
    let delivered: Vec<&Order> = orders
        .iter()
        .filter(|o| status::is(&o.status, status::DELIVERED))
        .collect();
    if delivered.is_empty() {
        return 100;
    }

    let compliant = delivered
        .iter()
        .filter(|o| o.days <= i64::from(sla_days))
        .count();
    round_half_up(compliant as f64 / delivered.len() as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(id: &str, date: &str, order_status: &str) -> Order {
        Order {
            id: id.to_string(),
            date: date.to_string(),
            status: order_status.to_string(),
            ..Default::default()
        }
    }

    fn ctx() -> MetricsContext {
        MetricsContext::new(5, NaiveDate::from_ymd_opt(2025, 2, 20).unwrap())
    }

    #[test]
    fn test_breach_age() {
        let breaches = sla_breaches(&[order("R1", "2025-02-01", "Processing")], &ctx());
        assert_eq!(breaches.len(), 1);
        assert_eq!(breaches[0].order_id, "R1");
        assert_eq!(breaches[0].age_days, 19);
    }

    #[test]
    fn test_breach_boundary_is_strict() {
        let orders = vec![
            order("EXACT", "2025-02-15", "Pending"),
            order("OVER", "2025-02-14", "Pending"),
        ];
        let breaches = sla_breaches(&orders, &ctx());
        assert_eq!(breaches.len(), 1);
        assert_eq!(breaches[0].order_id, "OVER");
        assert_eq!(breaches[0].age_days, 6);
    }

    #[test]
    fn test_delivered_future_and_undated_excluded() {
        let orders = vec![
            order("D", "2025-01-01", "delivered"),
            order("F", "2025-03-01", "Pending"),
            order("U", "", "Pending"),
            order("A", "2025-01-10", "Shipped"),
            order("B", "2025-01-01", "Processing"),
        ];
        let ids: Vec<String> = sla_breaches(&orders, &ctx())
            .into_iter()
            .map(|b| b.order_id)
            .collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_compliance_rate() {
        let mut orders = vec![
            Order {
                days: 5,
                ..order("A", "2025-01-01", "Delivered")
            },
            Order {
                days: 6,
                ..order("B", "2025-01-01", "Delivered")
            },
            Order {
                days: 2,
                ..order("C", "2025-01-01", "Delivered")
            },
        ];
        assert_eq!(sla_compliance_rate(&orders, 5), 67);

        orders.iter_mut().for_each(|o| o.status = "Shipped".to_string());
        assert_eq!(sla_compliance_rate(&orders, 5), 100);
    }
}
