// ==========================================
// VDC 运营看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和 API 实例
// 启动: 打开存储 → 读取设置 → 恢复快照（各读一次）
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::api::{
    ApiResult, CommitOutcome, ConfigApi, DashboardApi, DashboardOverview, ImportSession,
};
use crate::config::{EngineThresholds, SettingsManager};
use crate::domain::types::{Granularity, ReportPeriod};
use crate::engine::MetricsEngine;
use crate::importer::{ImportPreview, UniversalDecoder, WorkbookDecoder, WorkbookImporter};
use crate::repository::{KeyValueStore, SnapshotRepository, SqliteKvStore};

/// 应用状态
///
/// 导入会话是唯一的可变状态，由异步锁保护（submit 需跨 await 持有）
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 看板设置 API
    pub config_api: Arc<ConfigApi>,

    /// 看板 API
    pub dashboard_api: Arc<DashboardApi>,

    /// 导入会话（持有已提交快照）
    pub session: Mutex<ImportSession>,
}

impl AppState {
    /// 创建新的 AppState 实例（SQLite 存储）
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let store = SqliteKvStore::new(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        let mut state = Self::with_store(Arc::new(store), Arc::new(UniversalDecoder::default()))?;
        state.db_path = db_path;
        Ok(state)
    }

    /// 使用指定存储与解码器创建（测试或嵌入场景）
    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        decoder: Arc<dyn WorkbookDecoder>,
    ) -> Result<Self, String> {
        let thresholds = EngineThresholds::default();

        let settings = SettingsManager::load(store.clone())
            .map_err(|e| format!("无法读取看板设置: {}", e))?;

        let mut session = ImportSession::new(
            decoder,
            WorkbookImporter::new(thresholds.clone()),
            SnapshotRepository::new(store),
        );
        session
            .load()
            .map_err(|e| format!("无法恢复数据快照: {}", e))?;

        tracing::info!("AppState初始化完成");
        Ok(Self {
            db_path: String::new(),
            config_api: Arc::new(ConfigApi::new(settings)),
            dashboard_api: Arc::new(DashboardApi::new(MetricsEngine::new(thresholds))),
            session: Mutex::new(session),
        })
    }

    /// 上传文件并生成预览
    pub async fn submit_import(&self, bytes: &[u8]) -> ApiResult<ImportPreview> {
        let mut session = self.session.lock().await;
        session.submit(bytes).await.cloned()
    }

    pub async fn commit_import(&self) -> ApiResult<CommitOutcome> {
        self.session.lock().await.commit()
    }

    pub async fn cancel_import(&self) -> ApiResult<()> {
        self.session.lock().await.cancel()
    }

    /// 基于已提交快照生成看板总览
    pub async fn overview(
        &self,
        period: ReportPeriod,
        granularity: Granularity,
        reference_date: Option<NaiveDate>,
    ) -> ApiResult<DashboardOverview> {
        let ctx = self.config_api.metrics_context(reference_date)?;
        let session = self.session.lock().await;
        Ok(self
            .dashboard_api
            .overview(session.live(), &ctx, period, granularity))
    }
}

/// 获取默认数据库路径
///
/// 优先读取环境变量 VDC_TRACKER_DB_PATH，其次为用户数据目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("VDC_TRACKER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./vdc_tracker.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("vdc-tracker-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("vdc-tracker");
        }

        std::fs::create_dir_all(&path).ok();
        path = path.join("vdc_tracker.db");
    }

    path.to_string_lossy().to_string()
}
