//! Bulk delete against an in-memory API.

mod common;

use std::time::Duration;

use backoffice_lib::ListView;
use backoffice_lib::NoticeLevel;
use backoffice_lib::api::BulkConfig;
use backoffice_lib::api::ExecutionMode;
use backoffice_lib::api::delete_records;
use backoffice_lib::error::ApiError;
use backoffice_lib::error::Error;
use backoffice_lib::model::Entity;
use backoffice_lib::model::RecordId;
use common::FakeApi;
use common::inquiry;

fn three_inquiries() -> Vec<serde_json::Value> {
    vec![
        inquiry("i1", "Riya", "pending", "2024-05-01T10:00:00.000Z"),
        inquiry("i2", "Arjun", "pending", "2024-05-02T10:00:00.000Z"),
        inquiry("i3", "Meera", "completed", "2024-05-03T10:00:00.000Z"),
    ]
}

fn ids(raw: &[&str]) -> Vec<RecordId> {
    raw.iter().map(|id| RecordId::from(*id)).collect()
}

#[tokio::test]
async fn test_second_failure_keeps_only_failed_id_selected() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    api.fail_on("i2");

    let list = ListView::new(api.collection());
    assert!(list.load().await.is_none());
    list.table().on_select_all_rows(true, ids(&["i3", "i1", "i2"]));
    list.open_confirm();

    let report = list.delete_selected().await.unwrap();

    assert_eq!(report.outcome.succeeded, ids(&["i1", "i3"]));
    assert_eq!(report.outcome.failed.len(), 1);
    assert_eq!(report.outcome.failed[0].id, RecordId::from("i2"));
    assert_eq!(report.notice.level, NoticeLevel::Error);
    assert_eq!(
        report.notice.message,
        "Deleted 2 of 3; 1 failed: HTTP 500: Cannot delete i2"
    );

    assert_eq!(list.table().selected(), ids(&["i2"]));
    assert!(!list.confirm_open());
    assert_eq!(list.view().total, 1);
    assert_eq!(api.row_ids(), ["i2"]);
}

#[tokio::test]
async fn test_calls_follow_sorted_id_order() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    let outcome = delete_records(
        &*api,
        common::BASE,
        Entity::Inquiry,
        ids(&["i3", "i1", "i2"]),
        &BulkConfig::default(),
    )
    .await
    .unwrap();

    assert!(outcome.all_succeeded());
    assert_eq!(
        api.delete_urls(),
        [
            format!("{}/i1/deleteInquiry", common::BASE),
            format!("{}/i2/deleteInquiry", common::BASE),
            format!("{}/i3/deleteInquiry", common::BASE),
        ]
    );
}

#[tokio::test]
async fn test_single_row_delete_ignores_selection() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    let list = ListView::new(api.collection());
    list.load().await;
    list.table().on_select_row("i1".into());

    let report = list.delete_row("i3".into()).await.unwrap();

    assert_eq!(report.notice.level, NoticeLevel::Success);
    assert_eq!(report.notice.message, "Delete success!");
    assert_eq!(list.table().selected(), ids(&["i1"]));
    assert_eq!(api.row_ids(), ["i1", "i2"]);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_call_times_out_and_the_rest_proceed() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    api.stall_on("i1");

    let config = BulkConfig::default().with_call_timeout(Duration::from_secs(5));
    let list = ListView::new(api.collection()).with_bulk_config(config);
    list.load().await;
    list.table().on_select_all_rows(true, ids(&["i1", "i2", "i3"]));

    let report = list.delete_selected().await.unwrap();

    assert_eq!(report.outcome.succeeded, ids(&["i2", "i3"]));
    let failure = &report.outcome.failed[0];
    assert_eq!(failure.id, RecordId::from("i1"));
    assert!(matches!(*failure.error, ApiError::Timeout(_)));
    assert_eq!(list.table().selected(), ids(&["i1"]));
}

#[tokio::test]
async fn test_batched_mode_sends_one_call() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    let config = BulkConfig::default().with_mode(ExecutionMode::Batched);

    let outcome = delete_records(
        &*api,
        common::BASE,
        Entity::Inquiry,
        ids(&["i2", "i1"]),
        &config,
    )
    .await
    .unwrap();

    assert_eq!(outcome.succeeded, ids(&["i1", "i2"]));
    let requests = api.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1, format!("{}/delete/all-inquiry", common::BASE));
    assert_eq!(
        requests[0].2,
        Some(serde_json::json!({ "ids": ["i1", "i2"] }))
    );
}

#[tokio::test]
async fn test_batched_failure_fails_every_id() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    api.fail_on("i3");
    let config = BulkConfig::default().with_mode(ExecutionMode::Batched);

    let outcome = delete_records(
        &*api,
        common::BASE,
        Entity::Inquiry,
        ids(&["i1", "i3"]),
        &config,
    )
    .await
    .unwrap();

    assert!(outcome.succeeded.is_empty());
    assert_eq!(outcome.failed_ids().count(), 2);
    assert_eq!(api.row_ids().len(), 3);
}

#[tokio::test]
async fn test_empty_selection_sends_nothing() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    let list = ListView::new(api.collection());
    list.load().await;

    let result = list.delete_selected().await;

    assert!(matches!(result, Err(Error::InvalidOperation(_))));
    assert!(api.delete_urls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_guard_refuses_overlapping_submission() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    api.stall_on("i1");
    let guard = backoffice_lib::SubmitGuard::new();

    let slow = {
        let guard = guard.clone();
        let api = api.clone();
        let patient = BulkConfig::default().with_call_timeout(Duration::from_secs(120));
        tokio::spawn(async move {
            guard
                .run(delete_records(
                    &*api,
                    common::BASE,
                    Entity::Inquiry,
                    ids(&["i1"]),
                    &patient,
                ))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(guard.is_submitting());

    let second: Result<_, Error> = guard
        .run(delete_records(
            &*api,
            common::BASE,
            Entity::Inquiry,
            ids(&["i2"]),
            &BulkConfig::default(),
        ))
        .await;
    assert!(matches!(second, Err(Error::Api(ApiError::Busy))));
    assert_eq!(api.delete_urls().len(), 1);

    let first = slow.await.unwrap().unwrap();
    assert!(first.all_succeeded());
    assert!(!guard.is_submitting());
}

#[tokio::test(start_paused = true)]
async fn test_list_view_refuses_delete_while_one_is_in_flight() {
    let api = FakeApi::new(Entity::Inquiry, three_inquiries());
    api.stall_on("i1");
    let config = BulkConfig::default().with_call_timeout(Duration::from_secs(120));
    let list = ListView::new(api.collection()).with_bulk_config(config);
    list.load().await;
    list.table().on_select_all_rows(true, ids(&["i1", "i2"]));
    assert!(!list.is_submitting());

    let (first, second) = tokio::join!(list.delete_selected(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(list.is_submitting());
        assert!(list.submit_guard().is_submitting());
        list.delete_row("i3".into()).await
    });

    assert!(matches!(second, Err(Error::Api(ApiError::Busy))));
    assert_eq!(first.unwrap().outcome.succeeded, ids(&["i1", "i2"]));
    assert!(!list.is_submitting());
    assert_eq!(api.row_ids(), ["i3"]);
    assert_eq!(api.delete_urls().len(), 2);
}
