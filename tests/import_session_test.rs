// ==========================================
// 导入会话集成测试
// ==========================================
// 覆盖: 预览 → 确认/取消、解码失败、空预览、落盘失败、重启恢复
// ==========================================


use chrono::NaiveDate;
use std::sync::Arc;
use test_helpers::{
    create_test_db, memory_store, sample_workbook, CorruptFileDecoder, FlakyKvStore, MockDecoder,
};
use vdc_tracker::api::{ApiError, CommitOutcome, ImportSession, SessionState};
use vdc_tracker::app::AppState;
use vdc_tracker::domain::{RawRow, Workbook};
use vdc_tracker::importer::{
    EntityKind, ImportWarning, UniversalDecoder, WorkbookDecoder, WorkbookImporter,
};
use vdc_tracker::repository::{KeyValueStore, SnapshotRepository, SqliteKvStore};
use vdc_tracker::{Granularity, IssueCategory, ReportPeriod};

fn new_session(
    decoder: Arc<dyn WorkbookDecoder>,
    store: Arc<dyn KeyValueStore>,
) -> ImportSession {
    ImportSession::new(
        decoder,
        WorkbookImporter::default(),
        SnapshotRepository::new(store),
    )
}

#[tokio::test]
async fn test_full_workbook_preview_and_commit() {
    vdc_tracker::logging::init_test();
    let store = memory_store();
    let mut session = new_session(MockDecoder::new(sample_workbook()), store.clone());

    let preview = session.submit(b"xlsx").await.unwrap().clone();
    assert!(preview.warnings.is_empty());
    assert_eq!(preview.counts.orders, 2);
    assert_eq!(preview.counts.serialized, 2);
    assert_eq!(preview.counts.bulk, 1);
    assert_eq!(preview.counts.receive_log, 2);
    assert_eq!(preview.counts.financials, 3);
    assert_eq!(preview.counts.allocation, 1);
    assert_eq!(preview.counts.client, 1);

    let orders = preview.diagnostics.for_entity(EntityKind::Orders).unwrap();
    assert_eq!(orders.rows_in, 3);
    assert_eq!(orders.dropped, 1);
    assert!(orders.bindings.iter().any(|b| b.field == "id"));

    // 预览阶段不修改已提交数据
    assert!(session.live().is_empty());

    let outcome = session.commit().unwrap();
    match outcome {
        CommitOutcome::Committed { preview_id, counts } => {
            assert_eq!(preview_id, preview.preview_id);
            assert_eq!(counts.orders, 2);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.last_transition(), Some(SessionState::Committed));

    let live = session.live();
    let delivered = live.orders.iter().find(|o| o.id == "RITM1002").unwrap();
    assert!(delivered.deployed);
    assert_eq!(delivered.allocated_user, "bjones");
    assert_eq!(delivered.laptop_model, "Latitude 5440");
    assert_eq!(delivered.vendor, "CDW");
    assert_eq!(delivered.days, 3);
    assert_eq!(delivered.issue, Some(IssueCategory::WrongAddress));

    let pending = live.orders.iter().find(|o| o.id == "RITM1001").unwrap();
    assert_eq!(pending.date, "2025-02-01");
    assert_eq!(pending.issue, Some(IssueCategory::CarrierDelay));
    assert!(!pending.deployed);

    assert_eq!(live.inventory.bulk[0].stock, 350);
    assert_eq!(live.financials[0].total_cost, 2400.0);

    // 持久化内容与内存快照一致
    let persisted = SnapshotRepository::new(store).load_snapshot().unwrap().unwrap();
    assert_eq!(&persisted, live);
}

#[tokio::test]
async fn test_cancel_discards_preview() {
    let mut session = new_session(MockDecoder::new(sample_workbook()), memory_store());

    session.submit(b"xlsx").await.unwrap();
    session.cancel().unwrap();

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.last_transition(), Some(SessionState::Cancelled));
    assert!(session.preview().is_none());
    assert!(session.live().is_empty());
}

#[tokio::test]
async fn test_decode_failure_leaves_session_idle() {
    let store = memory_store();
    let mut session = new_session(Arc::new(CorruptFileDecoder), store.clone());

    let err = session.submit(b"not a workbook").await.unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(store.get("vdc.snapshot").unwrap().is_none());

    // 仍可发起下一次导入
    assert!(matches!(
        session.commit(),
        Err(ApiError::InvalidStateTransition { .. })
    ));
}

#[tokio::test]
async fn test_unrecognized_workbook_commit_is_skipped() {
    let store = memory_store();

    // 先提交一份有效数据
    let mut session = new_session(MockDecoder::new(sample_workbook()), store.clone());
    session.submit(b"xlsx").await.unwrap();
    session.commit().unwrap();
    let committed = session.live().clone();

    let wb = Workbook::new().with_sheet("Sheet1", vec![RawRow::new().with("Foo", "bar")]);
    let mut session = new_session(MockDecoder::new(wb), store.clone());
    session.load().unwrap();

    let preview = session.submit(b"xlsx").await.unwrap();
    assert!(matches!(
        preview.warnings.as_slice(),
        [ImportWarning::NoRecognizedSheets { .. }]
    ));

    let outcome = session.commit().unwrap();
    assert!(matches!(outcome, CommitOutcome::SkippedEmpty { .. }));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.live(), &committed);
}

#[tokio::test]
async fn test_persistence_failure_keeps_preview() {
    let store = Arc::new(FlakyKvStore::default());
    let mut session = new_session(MockDecoder::new(sample_workbook()), store.clone());

    session.submit(b"xlsx").await.unwrap();
    store.set_fail_writes(true);

    let err = session.commit().unwrap_err();
    assert!(matches!(err, ApiError::PersistenceError(_)));
    assert_eq!(session.state(), SessionState::Previewing);
    assert!(session.live().is_empty());
    assert!(session.preview().is_some());

    // 存储恢复后可重试
    store.set_fail_writes(false);
    assert!(matches!(
        session.commit().unwrap(),
        CommitOutcome::Committed { .. }
    ));
    assert_eq!(session.live().orders.len(), 2);
}

#[tokio::test]
async fn test_csv_upload_through_app_state_survives_restart() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let csv = "Order ID (RITM),Order Date,Status,Comments\n\
               RITM1,2025-02-01,Processing,\n\
               RITM2,2025-02-18,Shipped,Box cracked on arrival\n";

    {
        let state = AppState::new(db_path.clone()).unwrap();
        let preview = state.submit_import(csv.as_bytes()).await.unwrap();
        assert_eq!(preview.counts.orders, 2);
        // CSV 只有订单表，其余主表缺失
        assert_eq!(preview.warnings.len(), 4);
        state.commit_import().await.unwrap();
        state.config_api.update_sla_days(10).unwrap();
    }

    let state = AppState::new(db_path).unwrap();
    let reference = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();
    let overview = state
        .overview(ReportPeriod::AllTime, Granularity::Monthly, Some(reference))
        .await
        .unwrap();

    assert_eq!(overview.context.sla_days, 10);
    assert_eq!(overview.counts.orders, 2);
    assert_eq!(overview.sla_breaches.len(), 1);
    assert_eq!(overview.sla_breaches[0].order_id, "RITM1");
    assert_eq!(overview.sla_breaches[0].age_days, 19);
    assert_eq!(overview.rollup.issue_histogram.len(), 1);
    assert_eq!(
        overview.rollup.issue_histogram[0].category,
        IssueCategory::Damaged
    );
}

#[tokio::test]
async fn test_sqlite_store_round_trip() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::new(&db_path).unwrap());
    let mut session = new_session(Arc::new(UniversalDecoder::default()), store.clone());

    session
        .submit(b"RITM,Status\nR9,Pending\n")
        .await
        .unwrap();
    session.commit().unwrap();

    let mut restored = new_session(Arc::new(UniversalDecoder::default()), store);
    assert!(restored.load().unwrap());
    assert_eq!(restored.live().orders[0].id, "R9");
}
