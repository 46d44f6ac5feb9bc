// ==========================================
// VDC 运营看板 - 库存解析（Inventory_Master）
// ==========================================
// 三类数据:
//   - 序列化资产（主键: 序列号）
//   - 批量耗材（主键: 名称，排除 TOTAL 汇总行）
//   - 入库流水（主键: 类型；重复表头优先取 _1 后缀列）
// ==========================================

use crate::config::field_aliases::{bulk as bulk_cols, inventory as cols, receive_log as log_cols};
use crate::domain::inventory::{BulkItem, InventoryItem, ReceiveLogEntry};
use crate::domain::raw::RawRow;
use crate::importer::parsers::{ParseOutcome, RowReader};

pub fn parse_serialized(rows: &[RawRow]) -> ParseOutcome<InventoryItem> {
    let mut reader = RowReader::new();
    let mut items = Vec::new();

    for row in rows {
        let serial_number = reader.text(row, "serialNumber", cols::SERIAL);
        if serial_number.is_empty() {
            continue;
        }

        items.push(InventoryItem {
            serial_number,
            item_type: reader.text(row, "type", cols::TYPE),
            brand: reader.text(row, "brand", cols::BRAND),
            model: reader.text(row, "model", cols::MODEL),
            status: reader.text(row, "status", cols::STATUS),
            po: reader.text(row, "po", cols::PO),
            received_date: reader.date(row, "receivedDate", cols::RECEIVED_DATE),
            location: reader.text(row, "location", cols::LOCATION),
            ..Default::default()
        });
    }

    reader.finish(items, rows.len())
}

/// 批量耗材；`summary_sentinel` 为汇总行名称（忽略大小写）
pub fn parse_bulk_items(rows: &[RawRow], summary_sentinel: &str) -> ParseOutcome<BulkItem> {
    let mut reader = RowReader::new();
    let mut items = Vec::new();

    for row in rows {
        let name = reader.text(row, "name", bulk_cols::NAME);
        if name.is_empty() || name.eq_ignore_ascii_case(summary_sentinel) {
            continue;
        }

        let received = reader.integer(row, "received", bulk_cols::RECEIVED);
        let shipped = reader.integer(row, "shipped", bulk_cols::SHIPPED);
        let stock = if reader.has_value(row, "stock", bulk_cols::STOCK) {
            reader.integer(row, "stock", bulk_cols::STOCK)
        } else {
            received.saturating_sub(shipped)
        };

        items.push(BulkItem {
            name,
            received,
            shipped,
            stock,
        });
    }

    reader.finish(items, rows.len())
}

pub fn parse_receive_log(rows: &[RawRow]) -> ParseOutcome<ReceiveLogEntry> {
    let mut reader = RowReader::new();
    let mut entries = Vec::new();

    for row in rows {
        let item_type = reader.text(row, "type", log_cols::TYPE);
        if item_type.is_empty() {
            continue;
        }

        entries.push(ReceiveLogEntry {
            po: reader.text(row, "po", log_cols::PO),
            date: reader.date(row, "date", log_cols::DATE),
            item_type,
            qty: reader.integer(row, "qty", log_cols::QTY),
        });
    }

    reader.finish(entries, rows.len())
}
