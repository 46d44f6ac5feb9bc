// ==========================================
// VDC 运营看板 - 库存领域模型
// ==========================================
// 包含: 序列化资产 / 散装耗材 / 入库流水
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// InventoryItem - 序列化资产（主键: 序列号）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItem {
    pub serial_number: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub brand: String,
    pub model: String,
    pub status: String, // In Stock / Assigned / Returned - Pending Wipe / Returned - Repair ...
    pub po: String,
    pub received_date: String,
    pub location: String,

    // ===== 合并期派生 =====
    pub allocated_to_order_id: String,
    pub allocated_to_user: String,
    pub vendor: String,
    pub cost: f64,
    pub warranty_end_date: String,
}

impl InventoryItem {
    pub fn clear_enrichment(&mut self) {
        self.allocated_to_order_id.clear();
        self.allocated_to_user.clear();
        self.vendor.clear();
        self.cost = 0.0;
        self.warranty_end_date.clear();
    }
}

// ==========================================
// BulkItem - 散装耗材（主键: 名称）
// ==========================================
// 不变量: 无显式库存列时 stock = received - shipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkItem {
    pub name: String,
    pub received: i64, // 累计入库
    pub shipped: i64,  // 累计出库
    pub stock: i64,    // 在库数量
}

// ==========================================
// ReceiveLogEntry - 入库流水（只追加，仅用于 FIFO 计价）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiveLogEntry {
    pub po: String,
    pub date: String,
    #[serde(rename = "type")]
    pub item_type: String, // 对应 BulkItem.name
    pub qty: i64,
}

// ==========================================
// Inventory - 库存集合（Inventory_Master 表整体）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Inventory {
    pub serialized: Vec<InventoryItem>,
    pub bulk: Vec<BulkItem>,
    pub receive_log: Vec<ReceiveLogEntry>,
}

impl Inventory {
    pub fn is_empty(&self) -> bool {
        self.serialized.is_empty() && self.bulk.is_empty() && self.receive_log.is_empty()
    }
}
