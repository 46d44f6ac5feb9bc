// ==========================================
// VDC 运营看板 - 交叉关联合并
// ==========================================
// 职责: 订单 ↔ 配发 ↔ 库存 ↔ 采购单 关联，回填派生字段
// 索引（键去空白、忽略大小写）:
//   - 订单号 → 配发记录列表（首条为当前配发）
//   - 序列号 → 库存资产（后写覆盖）
//   - PO 号  → 采购单（首条命中）
// 红线: 纯函数，派生字段每次从源字段重算（重复合并结果一致）
//       订单或配发任一为空时不做任何回填（派生字段保持清空后的默认值，
//       采购单 total_cost 保留解析期的值）
// ==========================================

use crate::domain::allocation::AllocationRecord;
use crate::domain::financial::FinancialRecord;
use crate::domain::inventory::InventoryItem;
use crate::domain::snapshot::DataSnapshot;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// 关联键规范化
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

// ==========================================
// CrossReferenceMerger
// ==========================================
#[derive(Debug, Default)]
pub struct CrossReferenceMerger;

impl CrossReferenceMerger {
    pub fn new() -> Self {
        Self
    }

    /// 合并快照，返回回填后的新快照（输入不变）
    #[instrument(skip(self, snapshot), fields(orders = snapshot.orders.len(), allocations = snapshot.allocation.len()))]
    pub fn merge(&self, snapshot: &DataSnapshot) -> DataSnapshot {
        let mut merged = snapshot.clone();
        for order in &mut merged.orders {
            order.clear_enrichment();
        }
        for item in &mut merged.inventory.serialized {
            item.clear_enrichment();
        }

        if merged.orders.is_empty() || merged.allocation.is_empty() {
            debug!("订单或配发记录为空，跳过关联合并");
            return merged;
        }

        let financial_index = build_financial_index(&merged.financials);

        // 1. 采购单对账数量 → total_cost
        self.reconcile_financials(&mut merged);

        // 2. 库存 → 采购单（供应商/单价/保修）
        for item in &mut merged.inventory.serialized {
            if let Some(fin) = lookup(&financial_index, &merged.financials, &item.po) {
                item.vendor = fin.vendor.clone();
                item.cost = fin.cost;
                item.warranty_end_date = fin.warranty_end_date.clone();
            }
        }

        // 3. 配发回填
        let allocation_index = build_allocation_index(&merged.allocation);
        let serial_index = build_serial_index(&merged.inventory.serialized);

        let mut deployed = 0usize;
        for order in &mut merged.orders {
            let Some(first) = allocation_index
                .get(&normalize_key(&order.id))
                .and_then(|list| list.first())
                .map(|&i| &merged.allocation[i])
            else {
                continue;
            };

            order.deployed = true;
            order.allocated_user = first.user.clone();
            order.allocated_laptop_serial = first.laptop.clone();
            deployed += 1;

            let Some(item) = serial_index
                .get(&normalize_key(&first.laptop))
                .map(|&i| &merged.inventory.serialized[i])
            else {
                continue;
            };
            order.laptop_model = item.model.clone();
            order.laptop_manufacturer = item.brand.clone();

            if let Some(fin) = lookup(&financial_index, &merged.financials, &item.po) {
                order.vendor = fin.vendor.clone();
                order.warranty_end_date = fin.warranty_end_date.clone();
            }
        }

        // 库存反查：首条配发到该序列号的记录
        for item in &mut merged.inventory.serialized {
            let serial = normalize_key(&item.serial_number);
            if let Some(alloc) = merged
                .allocation
                .iter()
                .find(|a| normalize_key(&a.laptop) == serial)
            {
                item.allocated_to_order_id = alloc.ritm.clone();
                item.allocated_to_user = alloc.user.clone();
            }
        }

        info!(deployed = deployed, "配发回填完成");
        merged
    }

    /// 对账数量 = max(入库流水合计, 同 PO 资产数, 申报数量)，下限 1
    fn reconcile_financials(&self, snapshot: &mut DataSnapshot) {
        let mut received_by_po: HashMap<String, i64> = HashMap::new();
        for entry in &snapshot.inventory.receive_log {
            let total = received_by_po.entry(normalize_key(&entry.po)).or_default();
            *total = total.saturating_add(entry.qty);
        }

        let mut assets_by_po: HashMap<String, i64> = HashMap::new();
        for item in &snapshot.inventory.serialized {
            *assets_by_po.entry(normalize_key(&item.po)).or_default() += 1;
        }

        for record in &mut snapshot.financials {
            let key = normalize_key(&record.po);
            let received = received_by_po.get(&key).copied().unwrap_or(0);
            let assets = assets_by_po.get(&key).copied().unwrap_or(0);
            let qty = received.max(assets).max(record.qty).max(1);
            record.total_cost = record.cost * qty as f64;
        }
    }
}

// 订单号 → 配发记录下标（保持源顺序）
fn build_allocation_index(allocations: &[AllocationRecord]) -> HashMap<String, Vec<usize>> {
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, record) in allocations.iter().enumerate() {
        index.entry(normalize_key(&record.ritm)).or_default().push(i);
    }
    index
}

// 序列号 → 资产下标（后写覆盖）
fn build_serial_index(items: &[InventoryItem]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        index.insert(normalize_key(&item.serial_number), i);
    }
    index
}

// PO 号 → 采购单下标（首条命中）
fn build_financial_index(records: &[FinancialRecord]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        index.entry(normalize_key(&record.po)).or_insert(i);
    }
    index
}

fn lookup<'a>(
    index: &HashMap<String, usize>,
    records: &'a [FinancialRecord],
    po: &str,
) -> Option<&'a FinancialRecord> {
    let key = normalize_key(po);
    if key.is_empty() {
        return None;
    }
    index.get(&key).map(|&i| &records[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::ReceiveLogEntry;
    use crate::domain::order::Order;

    fn snapshot() -> DataSnapshot {
        let mut s = DataSnapshot::default();
        s.orders.push(Order {
            id: "RITM1".to_string(),
            ..Default::default()
        });
        s.orders.push(Order {
            id: "RITM2".to_string(),
            ..Default::default()
        });
        s.allocation.push(AllocationRecord {
            ritm: " ritm1 ".to_string(),
            user: "alice".to_string(),
            laptop: "sn-1".to_string(),
            ..Default::default()
        });
        s.allocation.push(AllocationRecord {
            ritm: "RITM1".to_string(),
            user: "bob".to_string(),
            laptop: "SN-2".to_string(),
            ..Default::default()
        });
        s.inventory.serialized.push(InventoryItem {
            serial_number: "SN-1".to_string(),
            model: "Old".to_string(),
            po: "PO1".to_string(),
            ..Default::default()
        });
        s.inventory.serialized.push(InventoryItem {
            serial_number: "SN-1".to_string(),
            model: "Latitude".to_string(),
            brand: "Dell".to_string(),
            po: "po1".to_string(),
            ..Default::default()
        });
        s.financials.push(FinancialRecord {
            po: "PO1".to_string(),
            vendor: "CDW".to_string(),
            cost: 1000.0,
            qty: 1,
            warranty_end_date: "2028-01-01".to_string(),
            ..Default::default()
        });
        s.financials.push(FinancialRecord {
            po: "PO1".to_string(),
            vendor: "Other".to_string(),
            ..Default::default()
        });
        s
    }

    #[test]
    fn test_order_enrichment_uses_first_allocation() {
        let merged = CrossReferenceMerger::new().merge(&snapshot());
        let order = &merged.orders[0];
        assert!(order.deployed);
        assert_eq!(order.allocated_user, "alice");
        assert_eq!(order.allocated_laptop_serial, "sn-1");
        // 序列号重复时后写覆盖
        assert_eq!(order.laptop_model, "Latitude");
        assert_eq!(order.laptop_manufacturer, "Dell");
        // PO 重复时首条命中
        assert_eq!(order.vendor, "CDW");
        assert_eq!(order.warranty_end_date, "2028-01-01");

        assert!(!merged.orders[1].deployed);
        assert!(merged.orders[1].allocated_user.is_empty());
    }

    #[test]
    fn test_inventory_reverse_scan() {
        let merged = CrossReferenceMerger::new().merge(&snapshot());
        for item in &merged.inventory.serialized {
            assert_eq!(item.allocated_to_order_id, " ritm1 ");
            assert_eq!(item.allocated_to_user, "alice");
            assert_eq!(item.vendor, "CDW");
            assert_eq!(item.cost, 1000.0);
        }
    }

    #[test]
    fn test_financial_reconciled_quantity() {
        let mut s = snapshot();
        s.inventory.receive_log.push(ReceiveLogEntry {
            po: "PO1 ".to_string(),
            item_type: "Laptop".to_string(),
            qty: 1,
            ..Default::default()
        });

        let merged = CrossReferenceMerger::new().merge(&s);
        // 资产数 2 > 入库 1 = 申报 1
        assert_eq!(merged.financials[0].total_cost, 2000.0);
        assert_eq!(merged.financials[1].total_cost, 0.0);
    }

    #[test]
    fn test_no_enrichment_without_allocations() {
        let mut s = snapshot();
        s.allocation.clear();
        s.financials[0].total_cost = 1000.0;

        let merged = CrossReferenceMerger::new().merge(&s);
        assert!(merged.orders.iter().all(|o| !o.deployed));
        for item in &merged.inventory.serialized {
            assert!(item.allocated_to_user.is_empty());
            assert!(item.vendor.is_empty());
            assert_eq!(item.cost, 0.0);
            assert!(item.warranty_end_date.is_empty());
        }
        // 未对账，保留解析期的值
        assert_eq!(merged.financials[0].total_cost, 1000.0);
    }

    #[test]
    fn test_no_enrichment_without_orders() {
        let mut s = snapshot();
        s.orders.clear();

        let merged = CrossReferenceMerger::new().merge(&s);
        assert!(merged.inventory.serialized[0].allocated_to_order_id.is_empty());
        assert!(merged.inventory.serialized[0].vendor.is_empty());
    }

    #[test]
    fn test_gated_merge_clears_stale_enrichment() {
        let merger = CrossReferenceMerger::new();
        let mut enriched = merger.merge(&snapshot());
        assert_eq!(enriched.inventory.serialized[0].vendor, "CDW");

        enriched.allocation.clear();
        let merged = merger.merge(&enriched);
        assert!(merged.orders.iter().all(|o| !o.deployed && o.vendor.is_empty()));
        assert!(merged.inventory.serialized[0].vendor.is_empty());
    }

    #[test]
    fn test_received_quantity_saturates() {
        let mut s = snapshot();
        for _ in 0..2 {
            s.inventory.receive_log.push(ReceiveLogEntry {
                po: "PO1".to_string(),
                qty: 9_000_000_000_000_000_000,
                ..Default::default()
            });
        }

        let merged = CrossReferenceMerger::new().merge(&s);
        assert_eq!(merged.financials[0].total_cost, 1000.0 * i64::MAX as f64);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let merger = CrossReferenceMerger::new();
        let once = merger.merge(&snapshot());
        let twice = merger.merge(&once);
        assert_eq!(once, twice);
    }
}
