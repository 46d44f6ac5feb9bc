// ==========================================
// VDC 运营看板 - 订单解析（Orders_Tracking）
// ==========================================
// 主键: Order ID (RITM)
// 解析期派生: issue / delivery_method / days
// ==========================================

use crate::config::field_aliases::order as cols;
use crate::domain::order::Order;
use crate::domain::raw::RawRow;
use crate::domain::types::status;
use crate::engine::calendar::{calendar_days_between, to_timestamp};
use crate::engine::classification::{classify_delivery_method, classify_issue};
use crate::importer::parsers::{ParseOutcome, RowReader};

pub fn parse_orders(rows: &[RawRow]) -> ParseOutcome<Order> {
    let mut reader = RowReader::new();
    let mut orders = Vec::new();

    for row in rows {
        let id = reader.text(row, "id", cols::ID);
        if id.is_empty() {
            continue;
        }

        let date = reader.date(row, "date", cols::DATE);
        let delivery_date = reader.date(row, "deliveryDate", cols::DELIVERY_DATE);
        let comments = reader.text(row, "comments", cols::COMMENTS);
        let address = reader.text(row, "address", cols::ADDRESS);

        let mut order_status = reader.text(row, "status", cols::STATUS);
        if order_status.is_empty() {
            order_status = status::PENDING.to_string();
        }

        let days = delivery_days(&date, &delivery_date)
            .unwrap_or_else(|| reader.integer(row, "days", cols::DAYS));

        orders.push(Order {
            id,
            start_date: reader.date(row, "startDate", cols::START_DATE),
            order_type: reader.text(row, "type", cols::TYPE),
            recipient_name: reader.text(row, "recipientName", cols::RECIPIENT),
            issue: classify_issue(&comments),
            delivery_method: classify_delivery_method(&comments, &address),
            status: order_status,
            date,
            delivery_date,
            comments,
            address,
            days,
            ..Default::default()
        });
    }

    reader.finish(orders, rows.len())
}

// 下单日与签收日均可解析时取日历天数差
fn delivery_days(date: &str, delivery_date: &str) -> Option<i64> {
    let start = to_timestamp(date)?;
    let end = to_timestamp(delivery_date)?;
    Some(calendar_days_between(start, end))
}
