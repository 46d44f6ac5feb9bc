// ==========================================
// VDC 运营看板 - 工作表定位器
// ==========================================
// 匹配分两级: 忽略大小写精确匹配 → 包含匹配
// 每一级内按候选名优先级，同一候选名按工作表顺序
// ==========================================

use crate::importer::field_resolver::MatchTier;
use serde::{Deserialize, Serialize};

/// 定位结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMatch {
    pub sheet: String,
    pub tier: MatchTier,
}

/// 定位工作表名称
pub fn locate(available: &[&str], candidates: &[&str]) -> Option<String> {
    locate_with_tier(available, candidates).map(|m| m.sheet)
}

/// 定位工作表名称并返回命中级别
pub fn locate_with_tier(available: &[&str], candidates: &[&str]) -> Option<SheetMatch> {
    for candidate in candidates {
        let wanted = candidate.trim().to_lowercase();
        if let Some(name) = available.iter().find(|n| n.trim().to_lowercase() == wanted) {
            return Some(SheetMatch {
                sheet: name.to_string(),
                tier: MatchTier::Normalized,
            });
        }
    }

    for candidate in candidates {
        let wanted = candidate.trim().to_lowercase();
        if wanted.is_empty() {
            continue;
        }
        if let Some(name) = available
            .iter()
            .find(|n| n.to_lowercase().contains(&wanted))
        {
            return Some(SheetMatch {
                sheet: name.to_string(),
                tier: MatchTier::Substring,
            });
        }
    }

    None
}
