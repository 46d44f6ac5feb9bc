// ==========================================
// VDC 运营看板 - 订单领域模型
// ==========================================
// 用途: Orders_Tracking 表解析产物，合并层补充派生字段
// 生命周期: 每次导入整体替换，合并后不再修改
// ==========================================

use crate::domain::types::{DeliveryMethod, IssueCategory};
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 配发订单（主键: RITM）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    // ===== 主键 =====
    pub id: String, // RITM 编号

    // ===== 源字段 =====
    pub date: String,          // 下单日期（ISO）
    pub start_date: String,    // 开始处理日期
    pub status: String,        // Pending/Processing/Shipped/Delivered/自由文本
    pub delivery_date: String, // 签收日期
    #[serde(rename = "type")]
    pub order_type: String,
    pub recipient_name: String,
    pub comments: String,
    pub address: String,

    // ===== 解析期派生 =====
    pub issue: Option<IssueCategory>,
    pub delivery_method: DeliveryMethod,
    pub days: i64, // 配送天数，无法计算时为 0

    // ===== 合并期派生（分配/库存/采购关联）=====
    pub deployed: bool,
    pub allocated_user: String,
    pub allocated_laptop_serial: String,
    pub laptop_model: String,
    pub laptop_manufacturer: String,
    pub warranty_end_date: String,
    pub vendor: String,
}

impl Order {
    /// 清除合并期派生字段（合并前重置，保证幂等）
    pub fn clear_enrichment(&mut self) {
        self.deployed = false;
        self.allocated_user.clear();
        self.allocated_laptop_serial.clear();
        self.laptop_model.clear();
        self.laptop_manufacturer.clear();
        self.warranty_end_date.clear();
        self.vendor.clear();
    }
}
