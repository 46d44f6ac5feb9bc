// ==========================================
// VDC 运营看板 - 导入会话（预览 → 确认）
// ==========================================
// 状态: Idle → Previewing → (Committed | Cancelled) → Idle
// 红线: submit 不修改已提交数据
//       commit 先落盘再替换内存快照，五类数据整体替换，无部分提交
//       解码失败会话保持 Idle，落盘失败会话保持 Previewing
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::snapshot::{DataSnapshot, SnapshotCounts};
use crate::importer::{ImportPreview, WorkbookDecoder, WorkbookImporter};
use crate::repository::{RepositoryError, SnapshotRepository};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

// ==========================================
// SessionState - 会话状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Previewing,
    Committed,
    Cancelled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Previewing => write!(f, "Previewing"),
            SessionState::Committed => write!(f, "Committed"),
            SessionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

// ==========================================
// CommitOutcome - 提交结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitOutcome {
    Committed {
        preview_id: String,
        counts: SnapshotCounts,
    },
    /// 预览中五类数据均为空，未替换已提交数据
    SkippedEmpty { preview_id: String, warning: String },
}

// ==========================================
// ImportSession
// ==========================================
pub struct ImportSession {
    decoder: Arc<dyn WorkbookDecoder>,
    importer: WorkbookImporter,
    repo: SnapshotRepository,
    live: DataSnapshot,
    state: SessionState,
    preview: Option<ImportPreview>,
    last_transition: Option<SessionState>,
}

impl ImportSession {
    pub fn new(
        decoder: Arc<dyn WorkbookDecoder>,
        importer: WorkbookImporter,
        repo: SnapshotRepository,
    ) -> Self {
        Self {
            decoder,
            importer,
            repo,
            live: DataSnapshot::default(),
            state: SessionState::Idle,
            preview: None,
            last_transition: None,
        }
    }

    /// 启动时从存储恢复已提交快照；返回是否恢复成功
    ///
    /// 快照内容无法解析时记录告警并以空数据启动（下次提交覆盖）
    #[instrument(skip(self))]
    pub fn load(&mut self) -> ApiResult<bool> {
        match self.repo.load_snapshot() {
            Ok(Some(snapshot)) => {
                info!(counts = ?snapshot.counts(), "已恢复持久化快照");
                self.live = snapshot;
                Ok(true)
            }
            Ok(None) => {
                info!("无持久化快照，使用空数据");
                Ok(false)
            }
            Err(RepositoryError::SerializationError { key, message }) => {
                warn!(key = %key, error = %message, "持久化快照无法解析，使用空数据");
                self.live = DataSnapshot::default();
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 最近一次结束预览的方式（Committed / Cancelled）
    pub fn last_transition(&self) -> Option<SessionState> {
        self.last_transition
    }

    /// 已提交快照
    pub fn live(&self) -> &DataSnapshot {
        &self.live
    }

    pub fn preview(&self) -> Option<&ImportPreview> {
        self.preview.as_ref()
    }

    /// 提交文件字节，生成预览（Idle → Previewing）
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn submit(&mut self, bytes: &[u8]) -> ApiResult<&ImportPreview> {
        self.expect_state(SessionState::Idle, SessionState::Previewing)?;

        let workbook = self.decoder.decode(bytes).await.map_err(|e| {
            error!(error = %e, "文件解码失败");
            ApiError::from(e)
        })?;

        let preview = self.importer.build_preview(&workbook);
        for warning in &preview.warnings {
            warn!(preview_id = %preview.preview_id, warning = %warning, "导入预览告警");
        }

        self.state = SessionState::Previewing;
        Ok(self.preview.insert(preview))
    }

    /// 确认预览（Previewing → Committed → Idle）
    #[instrument(skip(self))]
    pub fn commit(&mut self) -> ApiResult<CommitOutcome> {
        self.expect_state(SessionState::Previewing, SessionState::Committed)?;
        let preview = self
            .preview
            .as_ref()
            .ok_or_else(|| ApiError::InternalError("预览状态缺少预览数据".to_string()))?;

        if preview.is_empty() {
            let warning = "预览中没有任何可导入的数据，已跳过提交".to_string();
            warn!(preview_id = %preview.preview_id, "{}", warning);
            let outcome = CommitOutcome::SkippedEmpty {
                preview_id: preview.preview_id.clone(),
                warning,
            };
            self.finish(SessionState::Cancelled);
            return Ok(outcome);
        }

        // 落盘失败时保持 Previewing，已提交数据不变
        self.repo.save_snapshot(&preview.snapshot).map_err(|e| {
            error!(preview_id = %preview.preview_id, error = %e, "快照持久化失败");
            ApiError::from(e)
        })?;

        let outcome = CommitOutcome::Committed {
            preview_id: preview.preview_id.clone(),
            counts: preview.counts,
        };
        if let Some(preview) = self.preview.take() {
            self.live = preview.snapshot;
        }
        info!(counts = ?self.live.counts(), "导入已提交");
        self.finish(SessionState::Committed);
        Ok(outcome)
    }

    /// 放弃预览（Previewing → Cancelled → Idle）
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> ApiResult<()> {
        self.expect_state(SessionState::Previewing, SessionState::Cancelled)?;
        if let Some(preview) = &self.preview {
            info!(preview_id = %preview.preview_id, "导入预览已取消");
        }
        self.finish(SessionState::Cancelled);
        Ok(())
    }

    fn expect_state(&self, expected: SessionState, to: SessionState) -> ApiResult<()> {
        if self.state != expected {
            return Err(ApiError::InvalidStateTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    fn finish(&mut self, transition: SessionState) {
        self.preview = None;
        self.last_transition = Some(transition);
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::raw::{RawRow, Workbook};
    use crate::importer::{ImportError, ImportResult};
    use crate::repository::{KeyValueStore, MemoryKvStore};
    use async_trait::async_trait;

    struct FixedDecoder(Workbook);

    #[async_trait]
    impl WorkbookDecoder for FixedDecoder {
        async fn decode(&self, _bytes: &[u8]) -> ImportResult<Workbook> {
            Ok(self.0.clone())
        }
    }

    struct BrokenDecoder;

    #[async_trait]
    impl WorkbookDecoder for BrokenDecoder {
        async fn decode(&self, _bytes: &[u8]) -> ImportResult<Workbook> {
            Err(ImportError::UnsupportedFormat("garbage".to_string()))
        }
    }

    fn orders_workbook() -> Workbook {
        Workbook::new().with_sheet(
            "Orders_Tracking",
            vec![RawRow::new().with("Order ID (RITM)", "RITM1")],
        )
    }

    fn session(decoder: Arc<dyn WorkbookDecoder>) -> (ImportSession, Arc<dyn KeyValueStore>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        let session = ImportSession::new(
            decoder,
            WorkbookImporter::default(),
            SnapshotRepository::new(store.clone()),
        );
        (session, store)
    }

    #[tokio::test]
    async fn test_submit_then_commit() {
        let (mut session, store) = session(Arc::new(FixedDecoder(orders_workbook())));

        let preview = session.submit(b"bytes").await.unwrap();
        assert_eq!(preview.counts.orders, 1);
        assert_eq!(session.state(), SessionState::Previewing);
        assert!(session.live().orders.is_empty());

        let outcome = session.commit().unwrap();
        assert!(matches!(outcome, CommitOutcome::Committed { .. }));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.last_transition(), Some(SessionState::Committed));
        assert_eq!(session.live().orders[0].id, "RITM1");
        assert!(store.get("vdc.snapshot").unwrap().is_some());
    }

    #[test]
    fn test_unreadable_snapshot_starts_empty() {
        let (mut session, store) = session(Arc::new(BrokenDecoder));
        store.put("vdc.snapshot", "{not json").unwrap();

        assert!(!session.load().unwrap());
        assert!(session.live().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_snapshot_from_older_build_loads() {
        let (mut session, store) = session(Arc::new(BrokenDecoder));
        store
            .put("vdc.snapshot", r#"{"orders": [{"id": "RITM1", "date": "2025-02-01"}]}"#)
            .unwrap();

        assert!(session.load().unwrap());
        assert_eq!(session.live().orders[0].id, "RITM1");
        assert!(session.live().orders[0].status.is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_stays_idle() {
        let (mut session, _) = session(Arc::new(BrokenDecoder));

        let err = session.submit(b"??").await.unwrap_err();
        assert!(matches!(err, ApiError::ImportError(_)));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.preview().is_none());
    }

    #[tokio::test]
    async fn test_invalid_transitions() {
        let (mut session, _) = session(Arc::new(FixedDecoder(orders_workbook())));

        assert!(matches!(
            session.commit(),
            Err(ApiError::InvalidStateTransition { .. })
        ));
        assert!(session.cancel().is_err());

        session.submit(b"a").await.unwrap();
        assert!(matches!(
            session.submit(b"b").await,
            Err(ApiError::InvalidStateTransition { .. })
        ));

        session.cancel().unwrap();
        assert_eq!(session.last_transition(), Some(SessionState::Cancelled));
        assert!(session.live().is_empty());
    }
}
