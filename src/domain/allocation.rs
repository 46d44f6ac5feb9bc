// ==========================================
// VDC 运营看板 - 分配记录 / 客户导出
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// AllocationRecord - 用户分配记录（Allocation_Log）
// ==========================================
// 一个订单可有多条，源顺序第一条为当前分配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AllocationRecord {
    pub date: String,
    pub ritm: String,   // 订单号
    pub user: String,
    pub laptop: String, // 笔记本序列号
    pub items: String,
}

// ==========================================
// ClientRecord - 客户格式导出（Client_Format）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientRecord {
    pub mfg: String,
    pub model: String,
    pub sn: String,
    pub po: String,
    pub status: String,
}
