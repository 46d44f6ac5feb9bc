// ==========================================
// VDC 运营看板 - 日期工具
// ==========================================
// 红线: 天数差一律按 ceil(|Δms| / 86_400_000) 计算
//       SLA/库龄边界依赖该口径（days <= sla 为达标）
// ==========================================

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// 每日毫秒数
pub const MS_PER_DAY: i64 = 86_400_000;

/// 宽松解析日期/时间文本
///
/// 支持: YYYY-MM-DD / YYYY-MM-DDTHH:MM:SS[.fff][Z|±hh:mm] / YYYY-MM-DD HH:MM:SS
///       YYYY/MM/DD / MM/DD/YYYY / YYYY-MM（取当月 1 日）
pub fn to_timestamp(value: &str) -> Option<NaiveDateTime> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(start_of_day(d));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s.trim_end_matches('Z'), fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(start_of_day(d));
        }
    }
    if s.len() == 7 {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
            return Some(start_of_day(d));
        }
    }
    None
}

/// 宽松解析为日期（丢弃时刻）
pub fn to_date(value: &str) -> Option<NaiveDate> {
    to_timestamp(value).map(|dt| dt.date())
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 两个时刻之间的日历天数: ceil(|Δms| / 86_400_000)
pub fn calendar_days_between(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    let ms = (b - a).num_milliseconds().abs();
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

/// 参考时刻向前推 n 天
pub fn days_before(reference: NaiveDateTime, days: i64) -> NaiveDateTime {
    reference - Duration::days(days)
}
