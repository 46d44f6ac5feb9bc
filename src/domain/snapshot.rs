// ==========================================
// VDC 运营看板 - 数据快照
// ==========================================
// 职责: 五类实体集合的整体快照（导入预览 / 已提交数据 / 持久化内容）
// 红线: 五个集合只能整体替换，不允许部分提交
// ==========================================

use crate::domain::allocation::{AllocationRecord, ClientRecord};
use crate::domain::financial::FinancialRecord;
use crate::domain::inventory::Inventory;
use crate::domain::order::Order;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataSnapshot {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub financials: Vec<FinancialRecord>,
    #[serde(default)]
    pub allocation: Vec<AllocationRecord>,
    #[serde(default)]
    pub client: Vec<ClientRecord>,
}

impl DataSnapshot {
    /// 五个集合是否全部为空
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
            && self.inventory.is_empty()
            && self.financials.is_empty()
            && self.allocation.is_empty()
            && self.client.is_empty()
    }

    /// 各集合条数摘要（日志用）
    pub fn counts(&self) -> SnapshotCounts {
        SnapshotCounts {
            orders: self.orders.len(),
            serialized: self.inventory.serialized.len(),
            bulk: self.inventory.bulk.len(),
            receive_log: self.inventory.receive_log.len(),
            financials: self.financials.len(),
            allocation: self.allocation.len(),
            client: self.client.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCounts {
    pub orders: usize,
    pub serialized: usize,
    pub bulk: usize,
    pub receive_log: usize,
    pub financials: usize,
    pub allocation: usize,
    pub client: usize,
}
