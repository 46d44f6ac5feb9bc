// ==========================================
// VDC 运营看板 - 看板设置 API
// ==========================================
// 职责: 设置查询与更新（SLA 天数、自定义 Logo），生成指标口径
// ==========================================

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{DashboardSettings, SettingsManager};
use crate::engine::MetricsContext;

// ==========================================
// ConfigApi - 看板设置 API
// ==========================================
pub struct ConfigApi {
    settings: Mutex<SettingsManager>,
}

impl ConfigApi {
    pub fn new(settings: SettingsManager) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }

    /// 查询当前设置
    pub fn get_settings(&self) -> ApiResult<DashboardSettings> {
        Ok(self.lock()?.current().clone())
    }

    /// 更新 SLA 天数（1-30，越界返回 InvalidInput）
    pub fn update_sla_days(&self, days: u32) -> ApiResult<DashboardSettings> {
        let mut settings = self.lock()?;
        settings.set_sla_days(days)?;
        Ok(settings.current().clone())
    }

    /// 更新自定义 Logo（None 或空白为清除）
    pub fn update_custom_logo(&self, logo: Option<String>) -> ApiResult<DashboardSettings> {
        let mut settings = self.lock()?;
        settings.set_custom_logo(logo)?;
        Ok(settings.current().clone())
    }

    /// 指标口径：当前 SLA 天数 + 参考日期（缺省为今天）
    pub fn metrics_context(&self, reference_date: Option<NaiveDate>) -> ApiResult<MetricsContext> {
        let sla_days = self.lock()?.sla_days();
        Ok(match reference_date {
            Some(date) => MetricsContext::new(sla_days, date),
            None => MetricsContext::today(sla_days),
        })
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, SettingsManager>> {
        self.settings
            .lock()
            .map_err(|e| ApiError::InternalError(format!("设置锁获取失败: {}", e)))
    }
}
