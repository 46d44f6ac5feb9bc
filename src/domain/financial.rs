// ==========================================
// VDC 运营看板 - 采购（PO）领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// FinancialRecord - 采购单（主键: PO 号）
// ==========================================
// 派生: total_cost = cost × 对账数量（见 engine::merger）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialRecord {
    pub po: String,
    pub description: String,
    pub qty: i64, // 申报数量
    #[serde(rename = "type")]
    pub item_type: String,
    pub date: String,
    pub vendor: String,
    pub cost: f64, // 单价
    pub warranty_end_date: String,

    pub total_cost: f64,
}

impl FinancialRecord {
    /// 未对账时的总价（单价 × 申报数量，数量下限 1）
    pub fn declared_total(&self) -> f64 {
        self.cost * self.qty.max(1) as f64
    }
}
