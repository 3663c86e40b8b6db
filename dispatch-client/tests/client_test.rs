use dispatch_client::tonic::{Code, Status};
use dispatch_client::{
    ComponentCategory, ComponentSelector, ContractError, DispatchId, DispatchUpdate, EndCriteria,
    Frequency, ListError, ListFilter, ListParams, MicrogridId, NewDispatch, PagerStatus,
    RecurrenceRule, RequestError, RetryPolicy, SortField, SortOptions, SortOrder,
};
use dispatch_testing::{DispatchSampler, FakeClient};
use futures_util::TryStreamExt;
use std::time::{Duration, SystemTime};

const MICROGRID: MicrogridId = MicrogridId(7);

fn fast_retries() -> RetryPolicy {
    RetryPolicy::new(3).with_backoff(Duration::from_millis(1), Duration::from_millis(1))
}

async fn seeded_client(count: usize) -> FakeClient {
    let client = FakeClient::new().with_retry_policy(fast_retries());
    let mut sampler = DispatchSampler::new(42);
    client
        .service()
        .insert_all(sampler.generate_many(MICROGRID, count))
        .await;
    client
}

fn in_an_hour() -> SystemTime {
    SystemTime::now() + Duration::from_secs(60 * 60)
}

#[tokio::test]
async fn test_list_walks_every_page() {
    let client = seeded_client(10).await;

    let mut pager = client.list_with(ListParams::new(MICROGRID).with_page_size(3));
    assert_eq!(pager.status(), PagerStatus::Fresh);

    let mut sizes = Vec::new();
    while let Some(page) = pager.next_page().await {
        sizes.push(page.unwrap().len());
    }

    assert_eq!(sizes, vec![3, 3, 3, 1]);
    assert_eq!(pager.status(), PagerStatus::Exhausted);
    assert_eq!(client.service().list_request_count().await, 4);

    // An exhausted pager stays exhausted without further requests.
    assert!(pager.next().await.is_none());
    assert_eq!(client.service().list_request_count().await, 4);
}

#[tokio::test]
async fn test_list_yields_dispatches_in_insertion_order() {
    let client = seeded_client(5).await;

    let dispatches = client
        .list_with(ListParams::new(MICROGRID).with_page_size(2))
        .collect()
        .await
        .unwrap();

    let ids: Vec<_> = dispatches.iter().map(|d| d.id).collect();
    assert_eq!(ids, (1..=5).map(DispatchId).collect::<Vec<_>>());
    assert_eq!(dispatches, client.service().dispatches(MICROGRID).await);
}

#[tokio::test]
async fn test_list_of_empty_microgrid() {
    let client = seeded_client(3).await;

    let mut pager = client.list(MicrogridId(999), ListFilter::default(), None);

    assert!(pager.next().await.is_none());
    assert_eq!(pager.status(), PagerStatus::Exhausted);
    assert_eq!(client.service().list_request_count().await, 1);
}

#[tokio::test]
async fn test_list_is_lazy() {
    let client = seeded_client(3).await;

    let pager = client.list(MICROGRID, ListFilter::default(), None);
    drop(pager);

    assert_eq!(client.service().list_request_count().await, 0);
}

#[tokio::test]
async fn test_list_applies_filter() {
    let client = seeded_client(20).await;

    let filter = ListFilter {
        active: Some(true),
        ..ListFilter::default()
    };
    let expected: Vec<_> = client
        .service()
        .dispatches(MICROGRID)
        .await
        .into_iter()
        .filter(|d| d.active)
        .collect();

    let listed = client
        .list(MICROGRID, filter, None)
        .collect()
        .await
        .unwrap();

    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_list_filters_by_selector() {
    let client = FakeClient::new();
    let start = in_an_hour();
    let batteries = ComponentSelector::Category(ComponentCategory::Battery);
    let meters = ComponentSelector::Ids(vec![4, 5]);

    for selector in [batteries.clone(), meters, batteries.clone()] {
        let new = NewDispatch::new("TEST", start, Duration::from_secs(60), selector);
        client.create(MICROGRID, new).await.unwrap();
    }

    let filter = ListFilter {
        selectors: vec![batteries.clone()],
        ..ListFilter::default()
    };
    let listed = client
        .list(MICROGRID, filter, None)
        .collect()
        .await
        .unwrap();

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|d| d.selector == batteries));
}

#[tokio::test]
async fn test_list_sorted_by_start_time() {
    let client = seeded_client(15).await;

    let sort = SortOptions::new(SortField::StartTime, SortOrder::Descending);
    let listed = client
        .list_with(
            ListParams::new(MICROGRID)
                .with_sort(sort)
                .with_page_size(4),
        )
        .collect()
        .await
        .unwrap();

    assert_eq!(listed.len(), 15);
    assert!(listed.windows(2).all(|w| w[0].start_time >= w[1].start_time));
}

#[tokio::test]
async fn test_list_as_stream() {
    let client = seeded_client(7).await;

    let dispatches: Vec<_> = client
        .list_with(ListParams::new(MICROGRID).with_page_size(2))
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(dispatches.len(), 7);

    let pages: Vec<_> = client
        .list_with(ListParams::new(MICROGRID).with_page_size(2))
        .into_page_stream()
        .try_collect()
        .await
        .unwrap();
    let sizes: Vec<_> = pages.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2, 2, 1]);
}

#[tokio::test]
async fn test_resume_list_from_token() {
    let client = seeded_client(10).await;
    let params = ListParams::new(MICROGRID).with_page_size(4);

    let mut pager = client.list_with(params.clone());
    let first = pager.next_page().await.unwrap().unwrap();
    let token = pager.next_page_token().cloned().unwrap();

    let rest = client
        .resume_list(params, token)
        .unwrap()
        .collect()
        .await
        .unwrap();

    let all = client.service().dispatches(MICROGRID).await;
    assert_eq!(first, all[..4]);
    assert_eq!(rest, all[4..]);
}

#[tokio::test]
async fn test_resume_list_with_foreign_token_fails_before_any_request() {
    let client = seeded_client(10).await;
    let params = ListParams::new(MICROGRID).with_page_size(4);

    let mut pager = client.list_with(params.clone());
    pager.next_page().await.unwrap().unwrap();
    let token = pager.next_page_token().cloned().unwrap();
    let requests = client.service().list_request_count().await;

    let other = ListParams::new(MicrogridId(8)).with_page_size(4);
    let err = client.resume_list(other, token.clone()).err().unwrap();
    assert!(matches!(err, ContractError::PageTokenMismatch { .. }));

    let filtered = params.with_filter(ListFilter {
        dry_run: Some(true),
        ..ListFilter::default()
    });
    assert!(client.resume_list(filtered, token).is_err());

    assert_eq!(client.service().list_request_count().await, requests);
}

#[tokio::test]
async fn test_list_retries_unavailable() {
    let client = seeded_client(3).await;
    client
        .service()
        .fail_next_list(Status::unavailable("restarting"))
        .await;
    client
        .service()
        .fail_next_list(Status::deadline_exceeded("slow"))
        .await;

    let listed = client
        .list(MICROGRID, ListFilter::default(), None)
        .collect()
        .await
        .unwrap();

    assert_eq!(listed.len(), 3);
    assert_eq!(client.service().list_request_count().await, 3);
}

#[tokio::test]
async fn test_list_recovers_from_failure_mid_listing() {
    let client = seeded_client(9).await;
    let mut pager = client.list_with(ListParams::new(MICROGRID).with_page_size(3));

    let first = pager.next_page().await.unwrap().unwrap();
    client
        .service()
        .fail_next_list(Status::unavailable("blip"))
        .await;

    let mut rest = Vec::new();
    while let Some(page) = pager.next_page().await {
        rest.extend(page.unwrap());
    }

    let all = client.service().dispatches(MICROGRID).await;
    assert_eq!(first, all[..3]);
    assert_eq!(rest, all[3..]);
    assert_eq!(client.service().list_request_count().await, 4);
}

#[tokio::test]
async fn test_list_gives_up_after_max_retries() {
    let client = seeded_client(3).await;
    for _ in 0..4 {
        client
            .service()
            .fail_next_list(Status::unavailable("down"))
            .await;
    }

    let mut pager = client.list(MICROGRID, ListFilter::default(), None);
    let err = pager.next().await.unwrap().unwrap_err();

    assert!(matches!(&err, ListError::Transport(e) if e.code() == Code::Unavailable));
    assert_eq!(pager.status(), PagerStatus::Errored);
    assert_eq!(client.service().list_request_count().await, 4);

    assert!(pager.next().await.is_none());
    assert_eq!(client.service().list_request_count().await, 4);
}

#[tokio::test]
async fn test_list_does_not_retry_permanent_errors() {
    let client = seeded_client(3).await;
    client
        .service()
        .fail_next_list(Status::permission_denied("wrong key"))
        .await;

    let err = client
        .list(MICROGRID, ListFilter::default(), None)
        .collect()
        .await
        .unwrap_err();

    assert!(!err.is_retriable());
    assert!(matches!(err, ListError::Transport(e) if e.code() == Code::PermissionDenied));
    assert_eq!(client.service().list_request_count().await, 1);
}

#[tokio::test]
async fn test_concurrent_lists_share_one_client() {
    let client = FakeClient::new();
    let mut sampler = DispatchSampler::new(1);
    client
        .service()
        .insert_all(sampler.generate_many(MicrogridId(1), 6))
        .await;
    client
        .service()
        .insert_all(sampler.generate_many(MicrogridId(2), 9))
        .await;

    let (first, second) = tokio::join!(
        client
            .list_with(ListParams::new(MicrogridId(1)).with_page_size(2))
            .collect(),
        client
            .list_with(ListParams::new(MicrogridId(2)).with_page_size(2))
            .collect(),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.len(), 6);
    assert_eq!(second.len(), 9);
    assert!(first.iter().all(|d| d.microgrid_id == MicrogridId(1)));
    assert!(second.iter().all(|d| d.microgrid_id == MicrogridId(2)));
}

#[tokio::test]
async fn test_create_returns_stored_dispatch() {
    let client = FakeClient::new();
    let new = DispatchSampler::new(5).new_dispatch();

    let created = client.create(MICROGRID, new.clone()).await.unwrap();

    assert_eq!(created.id, DispatchId(1));
    assert_eq!(created.microgrid_id, MICROGRID);
    assert_eq!(NewDispatch::from(&created), new);
    assert_eq!(client.service().dispatches(MICROGRID).await, vec![created]);
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let client = seeded_client(4).await;
    let new = NewDispatch::new(
        "TEST",
        in_an_hour(),
        Duration::from_secs(300),
        ComponentSelector::Ids(vec![1]),
    );

    let created = client.create(MICROGRID, new).await.unwrap();
    assert_eq!(created.id, DispatchId(5));
}

#[tokio::test]
async fn test_create_rejects_start_in_the_past() {
    let client = FakeClient::new();
    let new = NewDispatch::new(
        "TEST",
        SystemTime::now() - Duration::from_secs(60),
        Duration::from_secs(300),
        ComponentSelector::Category(ComponentCategory::Inverter),
    );

    let err = client.create(MICROGRID, new).await.unwrap_err();

    assert!(matches!(err, RequestError::InvalidArgument(_)));
    assert!(client.service().dispatches(MICROGRID).await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_start_at_the_current_instant() {
    let client = FakeClient::new();
    let new = NewDispatch::new(
        "TEST",
        SystemTime::now(),
        Duration::from_secs(300),
        ComponentSelector::Category(ComponentCategory::Inverter),
    );

    let err = client.create(MICROGRID, new).await.unwrap_err();

    assert!(matches!(err, RequestError::InvalidArgument(_)));
    assert!(client.service().dispatches(MICROGRID).await.is_empty());
}

#[tokio::test]
async fn test_get_dispatch() {
    let client = seeded_client(3).await;
    let stored = client.service().dispatches(MICROGRID).await;

    let fetched = client.get(MICROGRID, DispatchId(2)).await.unwrap();
    assert_eq!(fetched, stored[1]);

    let err = client.get(MICROGRID, DispatchId(99)).await.unwrap_err();
    assert!(err.is_not_found());

    // Dispatches are scoped by microgrid.
    let err = client.get(MicrogridId(8), DispatchId(2)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_returns_modified_dispatch() {
    let client = seeded_client(3).await;
    let before = client.get(MICROGRID, DispatchId(1)).await.unwrap();

    let changes = DispatchUpdate::new()
        .active(!before.active)
        .duration(Duration::from_secs(42))
        .selector(ComponentSelector::Category(ComponentCategory::EvCharger));
    let updated = client
        .update(MICROGRID, DispatchId(1), &changes)
        .await
        .unwrap();

    assert_eq!(updated.active, !before.active);
    assert_eq!(updated.duration, Duration::from_secs(42));
    assert_eq!(
        updated.selector,
        ComponentSelector::Category(ComponentCategory::EvCharger)
    );
    assert_eq!(updated.dispatch_type, before.dispatch_type);
    assert_eq!(updated.start_time, before.start_time);
    assert!(updated.update_time > before.update_time);

    let stored = client.get(MICROGRID, DispatchId(1)).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_clears_end_criteria() {
    let client = FakeClient::new();
    let recurrence = RecurrenceRule {
        frequency: Some(Frequency::Daily),
        interval: 1,
        end_criteria: Some(EndCriteria::Count(5)),
        ..RecurrenceRule::default()
    };
    let new = NewDispatch::new(
        "TEST",
        in_an_hour(),
        Duration::from_secs(300),
        ComponentSelector::Category(ComponentCategory::Battery),
    )
    .with_recurrence(recurrence);
    let created = client.create(MICROGRID, new).await.unwrap();
    assert_eq!(
        created.recurrence.end_criteria,
        Some(EndCriteria::Count(5))
    );

    let changes = DispatchUpdate::new().clear_end_criteria();
    let updated = client
        .update(MICROGRID, created.id, &changes)
        .await
        .unwrap();

    assert_eq!(updated.recurrence.end_criteria, None);
    assert_eq!(updated.recurrence.frequency, Some(Frequency::Daily));
    let stored = client.get(MICROGRID, created.id).await.unwrap();
    assert_eq!(stored.recurrence.end_criteria, None);
}

#[tokio::test]
async fn test_update_rejects_empty_changes() {
    let client = seeded_client(1).await;

    let err = client
        .update(MICROGRID, DispatchId(1), &DispatchUpdate::new())
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_update_missing_dispatch() {
    let client = seeded_client(1).await;

    let err = client
        .update(MICROGRID, DispatchId(5), &DispatchUpdate::new().active(false))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_dispatch() {
    let client = seeded_client(3).await;

    client.delete(MICROGRID, DispatchId(2)).await.unwrap();

    let ids: Vec<_> = client
        .service()
        .dispatches(MICROGRID)
        .await
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![DispatchId(1), DispatchId(3)]);

    let err = client.delete(MICROGRID, DispatchId(2)).await.unwrap_err();
    assert!(err.is_not_found());
}
