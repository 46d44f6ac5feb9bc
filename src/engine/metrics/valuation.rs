// ==========================================
// VDC 运营看板 - 耗材库存估值（FIFO 口径，新批次优先）
// ==========================================
// 规则:
//   - 仅对在库数 > 0 的耗材估值
//   - 入库流水按名称匹配（去空白、忽略大小写），按日期新 → 旧消耗
//   - 单价取该流水 PO 对应的首条采购单，缺失按 0 计
// 红线: 估值件数不超过在库数
// ==========================================

use crate::domain::financial::FinancialRecord;
use crate::domain::inventory::{BulkItem, ReceiveLogEntry};
use crate::engine::calendar::to_timestamp;
use crate::engine::merger::normalize_key;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemValuation {
    pub name: String,
    pub stock: i64,
    pub units_valued: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FifoValuation {
    pub total_value: f64,
    pub total_units: i64,
    pub items: Vec<ItemValuation>,
}

pub fn fifo_valuation(
    bulk: &[BulkItem],
    receive_log: &[ReceiveLogEntry],
    financials: &[FinancialRecord],
) -> FifoValuation {
    let mut unit_costs: HashMap<String, f64> = HashMap::new();
    for record in financials {
        unit_costs
            .entry(normalize_key(&record.po))
            .or_insert(record.cost);
    }

    let mut result = FifoValuation::default();
    for item in bulk.iter().filter(|b| b.stock > 0) {
        let name = normalize_key(&item.name);
        let mut lots: Vec<&ReceiveLogEntry> = receive_log
            .iter()
            .filter(|e| normalize_key(&e.item_type) == name)
            .collect();
        // 新 → 旧；日期无法解析的批次排最后
        lots.sort_by_key(|e| Reverse(to_timestamp(&e.date)));

        let mut remaining = item.stock;
        let mut valuation = ItemValuation {
            name: item.name.clone(),
            stock: item.stock,
            units_valued: 0,
            value: 0.0,
        };

        for lot in lots {
            if remaining <= 0 {
                break;
            }
            let take = remaining.min(lot.qty.max(0));
            let cost = unit_costs
                .get(&normalize_key(&lot.po))
                .copied()
                .unwrap_or(0.0);
            valuation.units_valued += take;
            valuation.value += take as f64 * cost;
            remaining -= take;
        }

        debug!(item = %item.name, units = valuation.units_valued, value = valuation.value, "耗材估值");
        result.total_units = result.total_units.saturating_add(valuation.units_valued);
        result.total_value += valuation.value;
        result.items.push(valuation);
    }

    result
}
