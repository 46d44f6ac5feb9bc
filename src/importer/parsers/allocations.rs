// ==========================================
// VDC 运营看板 - 配发记录解析（Allocation_Log）
// ==========================================

use crate::config::field_aliases::allocation as cols;
use crate::domain::allocation::AllocationRecord;
use crate::domain::raw::RawRow;
use crate::importer::parsers::{ParseOutcome, RowReader};

pub fn parse_allocations(rows: &[RawRow]) -> ParseOutcome<AllocationRecord> {
    let mut reader = RowReader::new();
    let mut records = Vec::new();

    for row in rows {
        let ritm = reader.text(row, "ritm", cols::RITM);
        if ritm.is_empty() {
            continue;
        }

        records.push(AllocationRecord {
            date: reader.date(row, "date", cols::DATE),
            ritm,
            user: reader.text(row, "user", cols::USER),
            laptop: reader.text(row, "laptop", cols::LAPTOP),
            items: reader.text(row, "items", cols::ITEMS),
        });
    }

    reader.finish(records, rows.len())
}
