// ==========================================
// VDC 运营看板 - 看板设置与引擎阈值
// ==========================================
// 持久化: config_kv（key = vdc.settings）
// ==========================================

use serde::{Deserialize, Serialize};

/// SLA 天数默认值
pub const DEFAULT_SLA_DAYS: u32 = 5;
/// SLA 天数允许范围（含两端）
pub const SLA_DAYS_MIN: u32 = 1;
pub const SLA_DAYS_MAX: u32 = 30;

// ==========================================
// DashboardSettings - 用户可调设置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    #[serde(default = "default_sla_days")]
    pub sla_days: u32,
    /// 自定义 Logo（data URL 或路径，原样存储）
    #[serde(default)]
    pub custom_logo: Option<String>,
}

fn default_sla_days() -> u32 {
    DEFAULT_SLA_DAYS
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            sla_days: DEFAULT_SLA_DAYS,
            custom_logo: None,
        }
    }
}

impl DashboardSettings {
    /// SLA 天数是否在允许范围内
    pub fn is_valid_sla_days(days: u32) -> bool {
        (SLA_DAYS_MIN..=SLA_DAYS_MAX).contains(&days)
    }

    /// 将加载到的越界值收敛到允许范围
    pub fn normalized(mut self) -> Self {
        self.sla_days = self.sla_days.clamp(SLA_DAYS_MIN, SLA_DAYS_MAX);
        self
    }
}

// ==========================================
// EngineThresholds - 引擎常量
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineThresholds {
    /// 消耗速率为 0 时的"可用天数"哨兵值
    pub depletion_sentinel_days: i64,
    /// 耗材低库存阈值（在库数低于此值）
    pub low_stock_threshold: i64,
    /// 散装耗材汇总行哨兵名（忽略大小写）
    pub bulk_summary_sentinel: String,
}

impl Default for EngineThresholds {
    fn default() -> Self {
        Self {
            depletion_sentinel_days: 999,
            low_stock_threshold: 100,
            bulk_summary_sentinel: "TOTAL".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.sla_days, 5);
        assert!(settings.custom_logo.is_none());
    }

    #[test]
    fn test_settings_json_shape() {
        let settings: DashboardSettings =
            serde_json::from_str(r#"{"slaDays": 7, "customLogo": "logo.png"}"#).unwrap();
        assert_eq!(settings.sla_days, 7);
        assert_eq!(settings.custom_logo.as_deref(), Some("logo.png"));

        let settings: DashboardSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.sla_days, DEFAULT_SLA_DAYS);
    }

    #[test]
    fn test_normalized_clamps_range() {
        let settings = DashboardSettings {
            sla_days: 90,
            custom_logo: None,
        };
        assert_eq!(settings.normalized().sla_days, SLA_DAYS_MAX);

        let settings = DashboardSettings {
            sla_days: 0,
            custom_logo: None,
        };
        assert_eq!(settings.normalized().sla_days, SLA_DAYS_MIN);
        assert!(!DashboardSettings::is_valid_sla_days(31));
        assert!(DashboardSettings::is_valid_sla_days(30));
    }
}
