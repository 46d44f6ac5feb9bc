// ==========================================
// VDC 运营看板 - 客户导出解析（Client_Format）
// ==========================================

use crate::config::field_aliases::client as cols;
use crate::domain::allocation::ClientRecord;
use crate::domain::raw::RawRow;
use crate::importer::parsers::{ParseOutcome, RowReader};

pub fn parse_client(rows: &[RawRow]) -> ParseOutcome<ClientRecord> {
    let mut reader = RowReader::new();
    let mut records = Vec::new();

    for row in rows {
        let sn = reader.text(row, "sn", cols::SERIAL);
        if sn.is_empty() {
            continue;
        }

        records.push(ClientRecord {
            mfg: reader.text(row, "mfg", cols::MFG),
            model: reader.text(row, "model", cols::MODEL),
            sn,
            po: reader.text(row, "po", cols::PO),
            status: reader.text(row, "status", cols::STATUS),
        });
    }

    reader.finish(records, rows.len())
}
