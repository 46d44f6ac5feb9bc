// ==========================================
// VDC 运营看板 - 领域类型定义
// ==========================================
// 职责: 派生分类、统计口径等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 状态文本常量（源数据为自由文本）
// ==========================================
pub mod status {
    pub const PENDING: &str = "Pending";
    pub const PROCESSING: &str = "Processing";
    pub const SHIPPED: &str = "Shipped";
    pub const DELIVERED: &str = "Delivered";

    pub const IN_STOCK: &str = "In Stock";
    pub const ASSIGNED: &str = "Assigned";
    pub const RETURNED_PENDING_WIPE: &str = "Returned - Pending Wipe";
    pub const RETURNED_REPAIR: &str = "Returned - Repair";

    /// 状态比较（去空白、忽略大小写）
    pub fn is(value: &str, expected: &str) -> bool {
        value.trim().eq_ignore_ascii_case(expected)
    }
}

// ==========================================
// 配送问题分类 (Issue Category)
// ==========================================
// 顺序即判定优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    #[serde(rename = "Address Change In Transit")]
    AddressChangeInTransit,
    #[serde(rename = "Wrong Address")]
    WrongAddress,
    #[serde(rename = "User Unavailable")]
    UserUnavailable,
    #[serde(rename = "Damaged")]
    Damaged,
    #[serde(rename = "Lost in Transit")]
    LostInTransit,
    #[serde(rename = "Refused")]
    Refused,
    #[serde(rename = "Carrier Delay")]
    CarrierDelay,
    #[serde(rename = "Missing Item")]
    MissingItem,
    #[serde(rename = "Other Issue")]
    OtherIssue,
}

impl IssueCategory {
    /// 按优先级排列的全部分类
    pub const ALL: [IssueCategory; 9] = [
        IssueCategory::AddressChangeInTransit,
        IssueCategory::WrongAddress,
        IssueCategory::UserUnavailable,
        IssueCategory::Damaged,
        IssueCategory::LostInTransit,
        IssueCategory::Refused,
        IssueCategory::CarrierDelay,
        IssueCategory::MissingItem,
        IssueCategory::OtherIssue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::AddressChangeInTransit => "Address Change In Transit",
            IssueCategory::WrongAddress => "Wrong Address",
            IssueCategory::UserUnavailable => "User Unavailable",
            IssueCategory::Damaged => "Damaged",
            IssueCategory::LostInTransit => "Lost in Transit",
            IssueCategory::Refused => "Refused",
            IssueCategory::CarrierDelay => "Carrier Delay",
            IssueCategory::MissingItem => "Missing Item",
            IssueCategory::OtherIssue => "Other Issue",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 配送方式 (Delivery Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryMethod {
    #[default]
    Direct,
    Pickup,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMethod::Direct => write!(f, "Direct"),
            DeliveryMethod::Pickup => write!(f, "Pickup"),
        }
    }
}

// ==========================================
// 统计周期 (Report Period)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportPeriod {
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "Last 30")]
    Last30Days,
    #[serde(rename = "Last 90")]
    Last90Days,
    #[serde(rename = "All Time")]
    AllTime,
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportPeriod::YearToDate => write!(f, "YTD"),
            ReportPeriod::Last30Days => write!(f, "Last 30"),
            ReportPeriod::Last90Days => write!(f, "Last 90"),
            ReportPeriod::AllTime => write!(f, "All Time"),
        }
    }
}

// ==========================================
// 时间粒度 (Granularity) - 订单量趋势图
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Yearly,
    Quarterly,
    Monthly,
    Weekly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Yearly => write!(f, "Yearly"),
            Granularity::Quarterly => write!(f, "Quarterly"),
            Granularity::Monthly => write!(f, "Monthly"),
            Granularity::Weekly => write!(f, "Weekly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_category_serializes_as_label() {
        let json = serde_json::to_string(&IssueCategory::CarrierDelay).unwrap();
        assert_eq!(json, "\"Carrier Delay\"");
        for category in IssueCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn test_status_comparison_is_lenient() {
        assert!(status::is(" delivered ", status::DELIVERED));
        assert!(!status::is("Delivered late", status::DELIVERED));
    }
}
