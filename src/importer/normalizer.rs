// ==========================================
// VDC 运营看板 - 单元格值规范化
// ==========================================
// 职责: 日期 / 金额 / 整数的宽松解析
// 红线: 全部为全函数，异常输入退化为 "" 或 0，不返回错误
//       缺失数据由下游统计与校验体现
// ==========================================

use crate::domain::raw::CellValue;
use chrono::DateTime;

/// 表格日期序列号与 Unix 纪元的天数差（纪元 1899-12-30）
pub const SERIAL_UNIX_EPOCH_OFFSET_DAYS: f64 = 25_569.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// 日期规范化
///
/// - 文本: 原样透传（去首尾空白）
/// - 数值: 视为表格日期序列号，转换为 YYYY-MM-DD
/// - 空值 / 非法序列号: ""
pub fn parse_date(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Number(n) => serial_to_iso_date(*n).unwrap_or_default(),
        CellValue::Empty => String::new(),
    }
}

/// 序列号 → ISO 日期（小数部分为当日时刻，按毫秒四舍五入后取日期）
pub fn serial_to_iso_date(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    let ms = ((serial - SERIAL_UNIX_EPOCH_OFFSET_DAYS) * MS_PER_DAY).round();
    if ms.abs() > 8.64e15 {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64).map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
}

/// 金额解析：仅保留数字、'.'、'-'，无法解析为 0
pub fn parse_currency(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Number(_) | CellValue::Empty => 0.0,
        CellValue::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            leading_decimal(&cleaned).unwrap_or(0.0)
        }
    }
}

/// 整数解析：文本仅保留数字，数值向零截断，无法解析为 0
pub fn parse_integer(value: &CellValue) -> i64 {
    match value {
        CellValue::Number(n) if n.is_finite() && n.abs() < 9.0e18 => n.trunc() as i64,
        CellValue::Number(_) | CellValue::Empty => 0,
        CellValue::Text(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<i64>().unwrap_or(0)
        }
    }
}

/// 文本规范化（去首尾空白，空值为 ""）
pub fn parse_text(value: &CellValue) -> String {
    value.as_trimmed_string()
}

// 取最长的合法十进制前缀（"12.5.1" → 12.5，"-" → None）
fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse::<f64>().ok()
}
