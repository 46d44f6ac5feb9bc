// ==========================================
// VDC 运营看板 - 采购单解析（PO_Info）
// ==========================================
// 主键: PO 号
// total_cost 初值 = 单价 × max(申报数量, 1)，合并阶段再对账
// ==========================================

use crate::config::field_aliases::financial as cols;
use crate::domain::financial::FinancialRecord;
use crate::domain::raw::RawRow;
use crate::importer::parsers::{ParseOutcome, RowReader};

pub fn parse_financials(rows: &[RawRow]) -> ParseOutcome<FinancialRecord> {
    let mut reader = RowReader::new();
    let mut records = Vec::new();

    for row in rows {
        let po = reader.text(row, "po", cols::PO);
        if po.is_empty() {
            continue;
        }

        let mut record = FinancialRecord {
            po,
            description: reader.text(row, "description", cols::DESCRIPTION),
            qty: reader.integer(row, "qty", cols::QTY),
            item_type: reader.text(row, "type", cols::TYPE),
            date: reader.date(row, "date", cols::DATE),
            vendor: reader.text(row, "vendor", cols::VENDOR),
            cost: reader.currency(row, "cost", cols::COST),
            warranty_end_date: reader.date(row, "warrantyEndDate", cols::WARRANTY),
            total_cost: 0.0,
        };
        record.total_cost = record.declared_total();
        records.push(record);
    }

    reader.finish(records, rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_record_parsing() {
        let rows = vec![
            RawRow::new()
                .with("PO Number", "PO1")
                .with("Description", "Webcams")
                .with("Qty", 200.0)
                .with("Vendor", "CDW")
                .with("Unit Cost", "$1,234.50")
                .with("Warranty End Date", "2028-01-01"),
            RawRow::new().with("Vendor", "CDW"),
        ];

        let outcome = parse_financials(&rows);
        assert_eq!(outcome.entities.len(), 1);
        assert_eq!(outcome.dropped, 1);

        let record = &outcome.entities[0];
        assert_eq!(record.cost, 1234.5);
        assert_eq!(record.qty, 200);
        assert_eq!(record.total_cost, 246_900.0);
        assert_eq!(record.warranty_end_date, "2028-01-01");
    }

    #[test]
    fn test_zero_qty_counts_as_one_unit() {
        let rows = vec![RawRow::new().with("PO", "PO2").with("Cost", 12.0)];
        assert_eq!(parse_financials(&rows).entities[0].total_cost, 12.0);
    }

    #[test]
    fn test_substring_binds_first_column_in_sheet_order() {
        // "Cost" 同时命中两列时取靠前者
        let rows = vec![RawRow::new()
            .with("PO", "PO3")
            .with("Total Cost", 500.0)
            .with("Item Cost", 5.0)];

        let record = &parse_financials(&rows).entities[0];
        assert_eq!(record.cost, 500.0);
    }
}
