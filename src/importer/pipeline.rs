// ==========================================
// VDC 运营看板 - 工作簿导入流水线
// ==========================================
// 流程: 定位工作表 → 实体解析 → 交叉关联合并 → 生成预览
// 红线: 不触碰已提交数据，预览只是候选快照
//       找不到工作表只产生告警，不中断预览
// ==========================================

use crate::config::field_aliases::sheets;
use crate::config::settings::EngineThresholds;
use crate::domain::raw::{RawRow, Workbook};
use crate::domain::snapshot::{DataSnapshot, SnapshotCounts};
use crate::engine::merger::CrossReferenceMerger;
use crate::importer::field_resolver::MatchTier;
use crate::importer::parsers::{self, FieldBinding, ParseOutcome};
use crate::importer::sheet_locator::{locate_with_tier, SheetMatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// EntityKind - 数据集类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Orders,
    Inventory,
    BulkInventory,
    ReceiveLog,
    Financials,
    Allocations,
    Client,
}

impl EntityKind {
    /// 五个主数据集（参与"未识别工作表"判定）
    pub const PRIMARY: [EntityKind; 5] = [
        EntityKind::Orders,
        EntityKind::Inventory,
        EntityKind::Financials,
        EntityKind::Allocations,
        EntityKind::Client,
    ];

    pub fn sheet_candidates(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Orders => sheets::ORDERS,
            EntityKind::Inventory => sheets::INVENTORY,
            EntityKind::BulkInventory => sheets::BULK,
            EntityKind::ReceiveLog => sheets::RECEIVE_LOG,
            EntityKind::Financials => sheets::FINANCIALS,
            EntityKind::Allocations => sheets::ALLOCATIONS,
            EntityKind::Client => sheets::CLIENT,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Orders => "Orders",
            EntityKind::Inventory => "Inventory",
            EntityKind::BulkInventory => "Bulk Inventory",
            EntityKind::ReceiveLog => "Receive Log",
            EntityKind::Financials => "Financials",
            EntityKind::Allocations => "Allocations",
            EntityKind::Client => "Client",
        };
        write!(f, "{}", name)
    }
}

// ==========================================
// ImportWarning - 预览告警
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportWarning {
    NoRecognizedSheets { available: Vec<String> },
    SheetNotFound { entity: EntityKind },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::NoRecognizedSheets { available } => write!(
                f,
                "未识别到任何数据工作表（现有: {}）",
                available.join(", ")
            ),
            ImportWarning::SheetNotFound { entity } => write!(f, "未找到 {} 工作表", entity),
        }
    }
}

// ==========================================
// SheetDiagnostics / ImportDiagnostics - 解析诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetDiagnostics {
    pub entity: EntityKind,
    pub sheet: Option<String>,
    pub sheet_tier: Option<MatchTier>,
    pub rows_in: usize,
    pub entities_out: usize,
    pub dropped: usize,
    pub bindings: Vec<FieldBinding>,
}

impl SheetDiagnostics {
    fn missing(entity: EntityKind) -> Self {
        Self {
            entity,
            sheet: None,
            sheet_tier: None,
            rows_in: 0,
            entities_out: 0,
            dropped: 0,
            bindings: Vec::new(),
        }
    }

    fn from_outcome<T>(entity: EntityKind, found: &SheetMatch, outcome: &ParseOutcome<T>) -> Self {
        Self {
            entity,
            sheet: Some(found.sheet.clone()),
            sheet_tier: Some(found.tier),
            rows_in: outcome.rows_in,
            entities_out: outcome.entities.len(),
            dropped: outcome.dropped,
            bindings: outcome.bindings.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDiagnostics {
    pub sheets: Vec<SheetDiagnostics>,
}

impl ImportDiagnostics {
    pub fn for_entity(&self, entity: EntityKind) -> Option<&SheetDiagnostics> {
        self.sheets.iter().find(|s| s.entity == entity)
    }

    pub fn total_dropped(&self) -> usize {
        self.sheets.iter().map(|s| s.dropped).sum()
    }
}

// ==========================================
// ImportPreview - 待确认的候选快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub preview_id: String,
    pub created_at: DateTime<Utc>,
    pub snapshot: DataSnapshot,
    pub counts: SnapshotCounts,
    pub warnings: Vec<ImportWarning>,
    pub diagnostics: ImportDiagnostics,
}

impl ImportPreview {
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

// ==========================================
// WorkbookImporter
// ==========================================
#[derive(Debug, Default)]
pub struct WorkbookImporter {
    thresholds: EngineThresholds,
    merger: CrossReferenceMerger,
}

impl WorkbookImporter {
    pub fn new(thresholds: EngineThresholds) -> Self {
        Self {
            thresholds,
            merger: CrossReferenceMerger::new(),
        }
    }

    /// 工作簿 → 预览（解析 + 合并）
    #[instrument(skip(self, workbook), fields(sheets = workbook.sheets.len()))]
    pub fn build_preview(&self, workbook: &Workbook) -> ImportPreview {
        let available = workbook.sheet_names();
        let locate = |entity: EntityKind| locate_with_tier(&available, entity.sheet_candidates());

        let mut warnings = Vec::new();
        let mut diagnostics = ImportDiagnostics::default();
        let mut snapshot = DataSnapshot::default();

        let located: Vec<(EntityKind, Option<SheetMatch>)> = EntityKind::PRIMARY
            .iter()
            .map(|&entity| (entity, locate(entity)))
            .collect();

        if located.iter().all(|(_, found)| found.is_none()) {
            warn!(available = ?available, "未识别到任何数据工作表");
            warnings.push(ImportWarning::NoRecognizedSheets {
                available: available.iter().map(|s| s.to_string()).collect(),
            });
        } else {
            for (entity, found) in &located {
                if found.is_none() {
                    warn!(entity = %entity, "未找到工作表");
                    warnings.push(ImportWarning::SheetNotFound { entity: *entity });
                }
            }
        }

        let sheet_for = |entity: EntityKind| {
            located
                .iter()
                .find(|(e, _)| *e == entity)
                .and_then(|(_, found)| found.clone())
        };

        // 1. 订单
        if let Some(found) = sheet_for(EntityKind::Orders) {
            let outcome = parsers::parse_orders(rows_of(workbook, &found));
            diagnostics.sheets.push(SheetDiagnostics::from_outcome(EntityKind::Orders, &found, &outcome));
            snapshot.orders = outcome.entities;
        } else {
            diagnostics.sheets.push(SheetDiagnostics::missing(EntityKind::Orders));
        }

        // 2. 库存（序列化资产 + 耗材 + 入库流水）
        let inventory_sheet = sheet_for(EntityKind::Inventory);
        if let Some(found) = &inventory_sheet {
            let outcome = parsers::parse_serialized(rows_of(workbook, found));
            diagnostics.sheets.push(SheetDiagnostics::from_outcome(EntityKind::Inventory, found, &outcome));
            snapshot.inventory.serialized = outcome.entities;
        } else {
            diagnostics.sheets.push(SheetDiagnostics::missing(EntityKind::Inventory));
        }

        // 专用工作表优先，缺失时回落到库存表
        let bulk_sheet = locate(EntityKind::BulkInventory).or_else(|| inventory_sheet.clone());
        if let Some(found) = &bulk_sheet {
            let outcome = parsers::parse_bulk_items(
                rows_of(workbook, found),
                &self.thresholds.bulk_summary_sentinel,
            );
            diagnostics.sheets.push(SheetDiagnostics::from_outcome(EntityKind::BulkInventory, found, &outcome));
            snapshot.inventory.bulk = outcome.entities;
        }

        let log_sheet = locate(EntityKind::ReceiveLog).or_else(|| inventory_sheet.clone());
        if let Some(found) = &log_sheet {
            let outcome = parsers::parse_receive_log(rows_of(workbook, found));
            diagnostics.sheets.push(SheetDiagnostics::from_outcome(EntityKind::ReceiveLog, found, &outcome));
            snapshot.inventory.receive_log = outcome.entities;
        }

        // 3. 采购单
        if let Some(found) = sheet_for(EntityKind::Financials) {
            let outcome = parsers::parse_financials(rows_of(workbook, &found));
            diagnostics.sheets.push(SheetDiagnostics::from_outcome(EntityKind::Financials, &found, &outcome));
            snapshot.financials = outcome.entities;
        } else {
            diagnostics.sheets.push(SheetDiagnostics::missing(EntityKind::Financials));
        }

        // 4. 配发记录
        if let Some(found) = sheet_for(EntityKind::Allocations) {
            let outcome = parsers::parse_allocations(rows_of(workbook, &found));
            diagnostics.sheets.push(SheetDiagnostics::from_outcome(EntityKind::Allocations, &found, &outcome));
            snapshot.allocation = outcome.entities;
        } else {
            diagnostics.sheets.push(SheetDiagnostics::missing(EntityKind::Allocations));
        }

        // 5. 客户导出
        if let Some(found) = sheet_for(EntityKind::Client) {
            let outcome = parsers::parse_client(rows_of(workbook, &found));
            diagnostics.sheets.push(SheetDiagnostics::from_outcome(EntityKind::Client, &found, &outcome));
            snapshot.client = outcome.entities;
        } else {
            diagnostics.sheets.push(SheetDiagnostics::missing(EntityKind::Client));
        }

        let snapshot = self.merger.merge(&snapshot);
        let counts = snapshot.counts();
        info!(
            orders = counts.orders,
            serialized = counts.serialized,
            bulk = counts.bulk,
            financials = counts.financials,
            allocation = counts.allocation,
            dropped = diagnostics.total_dropped(),
            warnings = warnings.len(),
            "导入预览生成完成"
        );

        ImportPreview {
            preview_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            snapshot,
            counts,
            warnings,
            diagnostics,
        }
    }
}

fn rows_of<'a>(workbook: &'a Workbook, found: &SheetMatch) -> &'a [RawRow] {
    workbook.rows(&found.sheet).unwrap_or(&[])
}
