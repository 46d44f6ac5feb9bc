// ==========================================
// VDC 运营看板 - 字段解析器（模糊列名匹配）
// ==========================================
// 匹配分三级，先命中者胜:
//   1. Exact      - 列名完全相同
//   2. Normalized - 去首尾空白 + 忽略大小写相同
//   3. Substring  - 列名包含候选名（忽略大小写）
// 每一级内: 外层按候选名优先级，内层按列的源顺序
//   即靠前的候选名命中任意列即胜出，即使其他候选名命中更靠前的列
// 已知限制: 第三级可能绑定到非预期列（如 "Cost" 同时命中
//           "Unit Cost" 与 "Total Cost"），取列顺序靠前者，不做消歧
// ==========================================

use crate::domain::raw::{CellValue, RawRow};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// MatchTier - 命中级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchTier {
    Exact,
    Normalized,
    Substring,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "EXACT"),
            MatchTier::Normalized => write!(f, "NORMALIZED"),
            MatchTier::Substring => write!(f, "SUBSTRING"),
        }
    }
}

// ==========================================
// FieldMatch - 解析结果（值 + 实际绑定的列 + 命中级别）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch<'a> {
    pub column: &'a str,
    pub tier: MatchTier,
    pub value: &'a CellValue,
}

/// 解析字段值（不关心命中级别）
pub fn resolve<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a CellValue> {
    resolve_with_tier(row, candidates).map(|m| m.value)
}

/// 解析字段值并返回实际绑定的列与命中级别
pub fn resolve_with_tier<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<FieldMatch<'a>> {
    // 1. 精确匹配
    for candidate in candidates {
        if let Some((column, value)) = row.columns().find(|(c, _)| c == candidate) {
            return Some(FieldMatch {
                column,
                tier: MatchTier::Exact,
                value,
            });
        }
    }

    // 2. 去空白 + 忽略大小写
    for candidate in candidates {
        let wanted = candidate.trim().to_lowercase();
        if let Some((column, value)) = row
            .columns()
            .find(|(c, _)| c.trim().to_lowercase() == wanted)
        {
            return Some(FieldMatch {
                column,
                tier: MatchTier::Normalized,
                value,
            });
        }
    }

    // 3. 包含匹配
    for candidate in candidates {
        let wanted = candidate.trim().to_lowercase();
        if wanted.is_empty() {
            continue;
        }
        if let Some((column, value)) = row
            .columns()
            .find(|(c, _)| c.to_lowercase().contains(&wanted))
        {
            return Some(FieldMatch {
                column,
                tier: MatchTier::Substring,
                value,
            });
        }
    }

    None
}
