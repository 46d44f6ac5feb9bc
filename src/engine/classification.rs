// ==========================================
// VDC 运营看板 - 配送问题/配送方式分类
// ==========================================
// 职责: 备注文本 → 问题分类；备注 + 地址 → 配送方式
// 规则: 关键词表按优先级顺序匹配，命中即返回（小写子串匹配）
// ==========================================

use crate::domain::types::{DeliveryMethod, IssueCategory};

// 顺序即优先级，修改时注意前后关系（地址变更必须先于地址错误）
const ISSUE_RULES: &[(IssueCategory, &[&str])] = &[
    (
        IssueCategory::AddressChangeInTransit,
        &[
            "reroute",
            "re-route",
            "redirect",
            "address change",
            "change of address",
            "changed address",
            "update address",
            "new address",
        ],
    ),
    (
        IssueCategory::WrongAddress,
        &[
            "wrong address",
            "incorrect address",
            "bad address",
            "invalid address",
            "address not found",
            "undeliverable",
        ],
    ),
    (
        IssueCategory::UserUnavailable,
        &[
            "unavailable",
            "not available",
            "not home",
            "no one",
            "nobody",
            "not present",
            "absent",
            "out of office",
            "on leave",
            "vacation",
        ],
    ),
    (
        IssueCategory::Damaged,
        &["damage", "broken", "cracked", "defective"],
    ),
    (
        IssueCategory::LostInTransit,
        &[
            "lost",
            "missing package",
            "cannot locate",
            "can't locate",
            "not received",
            "never arrived",
        ],
    ),
    (
        IssueCategory::Refused,
        &["refused", "rejected", "declined", "return to sender"],
    ),
    (
        IssueCategory::CarrierDelay,
        &[
            "delay",
            "weather",
            "held at",
            "backlog",
            "stuck",
            "exception",
            "arrived late",
            "running late",
            "delivered late",
            "late delivery",
        ],
    ),
    (
        IssueCategory::MissingItem,
        &["missing", "incomplete", "short ship", "not included", "partial"],
    ),
];

const PICKUP_KEYWORDS: &[&str] = &[
    "pickup",
    "pick up",
    "pick-up",
    "picked up",
    "collect",
    "best buy",
    "staples",
    "office depot",
    "apple store",
    "fedex office",
    "ups store",
    "will call",
    "in-store",
    "in store",
];

/// 备注 → 问题分类
///
/// 空备注返回 None；非空但未命中任何关键词返回 OtherIssue
pub fn classify_issue(comments: &str) -> Option<IssueCategory> {
    let text = comments.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let matched = ISSUE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category);

    Some(matched.unwrap_or(IssueCategory::OtherIssue))
}

/// 备注 + 地址 → 配送方式（命中自提关键词为 Pickup）
pub fn classify_delivery_method(comments: &str, address: &str) -> DeliveryMethod {
    let text = format!("{} {}", comments, address).to_lowercase();
    if PICKUP_KEYWORDS.iter().any(|k| text.contains(k)) {
        DeliveryMethod::Pickup
    } else {
        DeliveryMethod::Direct
    }
}
