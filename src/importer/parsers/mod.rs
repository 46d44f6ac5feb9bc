// ==========================================
// VDC 运营看板 - 实体解析器
// ==========================================
// 职责: 原始行 → 领域实体（字段解析 + 值规范化）
// 规则: 缺少主键的行直接丢弃（视为空行/格式行，不报错）
//       输出顺序与输入行顺序一致
// ==========================================

pub mod allocations;
pub mod client;
pub mod financials;
pub mod inventory;
pub mod orders;

pub use allocations::parse_allocations;
pub use client::parse_client;
pub use financials::parse_financials;
pub use inventory::{parse_bulk_items, parse_receive_log, parse_serialized};
pub use orders::parse_orders;

use crate::domain::raw::{CellValue, RawRow};
use crate::importer::field_resolver::{resolve_with_tier, MatchTier};
use crate::importer::normalizer::{parse_currency, parse_date, parse_integer, parse_text};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// FieldBinding - 字段实际绑定的列（可观测性）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub field: String,
    pub column: String,
    pub tier: MatchTier,
}

// ==========================================
// ParseOutcome - 解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome<T> {
    pub entities: Vec<T>,
    pub rows_in: usize,
    pub dropped: usize,
    pub bindings: Vec<FieldBinding>,
}

impl<T> ParseOutcome<T> {
    pub fn empty() -> Self {
        Self {
            entities: Vec::new(),
            rows_in: 0,
            dropped: 0,
            bindings: Vec::new(),
        }
    }
}

// ==========================================
// RowReader - 带绑定记录的字段读取器
// ==========================================
// 每个字段只记录首次命中的列（同一工作表列结构一致）
#[derive(Debug, Default)]
pub(crate) struct RowReader {
    bindings: Vec<FieldBinding>,
}

impl RowReader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cell<'a>(
        &mut self,
        row: &'a RawRow,
        field: &str,
        candidates: &[&str],
    ) -> Option<&'a CellValue> {
        let found = resolve_with_tier(row, candidates)?;
        if !self.bindings.iter().any(|b| b.field == field) {
            debug!(field = field, column = found.column, tier = %found.tier, "字段绑定");
            self.bindings.push(FieldBinding {
                field: field.to_string(),
                column: found.column.to_string(),
                tier: found.tier,
            });
        }
        Some(found.value)
    }

    /// 字段是否存在且非空
    pub(crate) fn has_value(&mut self, row: &RawRow, field: &str, candidates: &[&str]) -> bool {
        self.cell(row, field, candidates)
            .map(|v| !v.is_blank())
            .unwrap_or(false)
    }

    pub(crate) fn text(&mut self, row: &RawRow, field: &str, candidates: &[&str]) -> String {
        self.cell(row, field, candidates)
            .map(parse_text)
            .unwrap_or_default()
    }

    pub(crate) fn date(&mut self, row: &RawRow, field: &str, candidates: &[&str]) -> String {
        self.cell(row, field, candidates)
            .map(parse_date)
            .unwrap_or_default()
    }

    pub(crate) fn currency(&mut self, row: &RawRow, field: &str, candidates: &[&str]) -> f64 {
        self.cell(row, field, candidates)
            .map(parse_currency)
            .unwrap_or(0.0)
    }

    pub(crate) fn integer(&mut self, row: &RawRow, field: &str, candidates: &[&str]) -> i64 {
        self.cell(row, field, candidates)
            .map(parse_integer)
            .unwrap_or(0)
    }

    pub(crate) fn finish<T>(self, entities: Vec<T>, rows_in: usize) -> ParseOutcome<T> {
        let dropped = rows_in.saturating_sub(entities.len());
        ParseOutcome {
            entities,
            rows_in,
            dropped,
            bindings: self.bindings,
        }
    }
}
