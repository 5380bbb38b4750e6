use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::{Arc, atomic::Ordering};
use std::time::Duration as StdDuration;
use wayfarer_core::application::error::ApplicationError;
use wayfarer_core::application::queries::audit::{AuditQueryService, ListAuditLogsQuery};

mod support;
use support::{MockAuditRepo, admin_actor, audit_log, editor_actor};

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn service(repo: Arc<MockAuditRepo>) -> AuditQueryService {
    AuditQueryService::new(repo, StdDuration::from_secs(60), 64)
}

fn query() -> ListAuditLogsQuery {
    ListAuditLogsQuery {
        date: None,
        start_date: None,
        end_date: None,
        limit: 10,
        cursor: None,
        force: false,
    }
}

#[tokio::test]
async fn paginating_partitions_the_dataset() {
    let base = ts(2026, 6, 1, 12, 0);
    let logs = (1..=25)
        .map(|i| audit_log(i, base + Duration::minutes(i)))
        .collect();
    let repo = Arc::new(MockAuditRepo::seeded(logs));
    let svc = service(Arc::clone(&repo));
    let actor = admin_actor(1);

    let mut seen = HashSet::new();
    let mut cursor = None;
    let mut pages = 0;

    loop {
        let page = svc
            .list_audit_logs(
                &actor,
                ListAuditLogsQuery {
                    cursor: cursor.clone(),
                    ..query()
                },
            )
            .await
            .unwrap();

        pages += 1;
        assert_eq!(page.total, Some(25));
        // newest-first within the page
        for pair in page.items.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
        for item in &page.items {
            assert!(seen.insert(item.id), "duplicate record {}", item.id);
        }

        if !page.has_more {
            assert!(page.next_cursor.is_none());
            break;
        }
        cursor = page.next_cursor.clone();
        assert!(cursor.is_some());
    }

    assert_eq!(pages, 3);
    assert_eq!(seen.len(), 25, "pagination omitted records");
}

#[tokio::test]
async fn exact_date_wins_over_a_range_covering_other_days() {
    let repo = Arc::new(MockAuditRepo::seeded(vec![
        audit_log(1, ts(2026, 6, 1, 9, 0)),
        audit_log(2, ts(2026, 6, 2, 9, 0)),
        audit_log(3, ts(2026, 6, 2, 23, 59)),
        audit_log(4, ts(2026, 6, 3, 0, 0)),
    ]));
    let svc = service(repo);
    let actor = admin_actor(1);

    // The range alone would select only record 1; the day filter wins.
    let page = svc
        .list_audit_logs(
            &actor,
            ListAuditLogsQuery {
                date: NaiveDate::from_ymd_opt(2026, 6, 2),
                start_date: Some(ts(2026, 6, 1, 0, 0)),
                end_date: Some(ts(2026, 6, 1, 23, 0)),
                ..query()
            },
        )
        .await
        .unwrap();

    let ids: Vec<_> = page.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(page.total, Some(2));
}

#[tokio::test]
async fn range_results_stay_inside_the_bounds() {
    let start = ts(2026, 6, 10, 0, 0);
    let end = ts(2026, 6, 20, 0, 0);
    let repo = Arc::new(MockAuditRepo::seeded(vec![
        audit_log(1, start - Duration::seconds(1)),
        audit_log(2, start),
        audit_log(3, ts(2026, 6, 15, 12, 0)),
        audit_log(4, end),
        audit_log(5, end + Duration::seconds(1)),
    ]));
    let svc = service(repo);

    let page = svc
        .list_audit_logs(
            &admin_actor(1),
            ListAuditLogsQuery {
                start_date: Some(start),
                end_date: Some(end),
                ..query()
            },
        )
        .await
        .unwrap();

    let ids: Vec<_> = page.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![4, 3, 2]);
}

#[tokio::test]
async fn inverted_range_is_rejected_before_touching_storage() {
    let repo = Arc::new(MockAuditRepo::default());
    let svc = service(Arc::clone(&repo));

    let err = svc
        .list_audit_logs(
            &admin_actor(1),
            ListAuditLogsQuery {
                start_date: Some(ts(2026, 6, 20, 0, 0)),
                end_date: Some(ts(2026, 6, 10, 0, 0)),
                ..query()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Validation(_)));
    assert_eq!(repo.list_call_count(), 0);
}

#[tokio::test]
async fn malformed_cursor_is_a_validation_error() {
    let repo = Arc::new(MockAuditRepo::default());
    let svc = service(repo);

    let err = svc
        .list_audit_logs(
            &admin_actor(1),
            ListAuditLogsQuery {
                cursor: Some("definitely not a cursor".into()),
                ..query()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Validation(_)));
}

#[tokio::test]
async fn repeated_queries_are_served_from_cache_until_forced() {
    let repo = Arc::new(MockAuditRepo::seeded(vec![audit_log(
        1,
        ts(2026, 6, 1, 12, 0),
    )]));
    let svc = service(Arc::clone(&repo));
    let actor = admin_actor(1);

    svc.list_audit_logs(&actor, query()).await.unwrap();
    svc.list_audit_logs(&actor, query()).await.unwrap();
    assert_eq!(repo.list_call_count(), 1, "second call should hit the cache");

    svc.list_audit_logs(
        &actor,
        ListAuditLogsQuery {
            force: true,
            ..query()
        },
    )
    .await
    .unwrap();
    assert_eq!(repo.list_call_count(), 2, "force must bypass the cache");
}

#[tokio::test]
async fn storage_failure_leaves_cached_pages_usable() {
    let repo = Arc::new(MockAuditRepo::seeded(vec![audit_log(
        1,
        ts(2026, 6, 1, 12, 0),
    )]));
    let svc = service(Arc::clone(&repo));
    let actor = admin_actor(1);

    let first = svc.list_audit_logs(&actor, query()).await.unwrap();
    assert_eq!(first.items.len(), 1);

    repo.fail_reads.store(true, Ordering::SeqCst);

    // Same page still answers from cache while storage is down.
    let cached = svc.list_audit_logs(&actor, query()).await.unwrap();
    assert_eq!(cached.items.len(), 1);

    // A forced refetch surfaces the failure without clearing anything.
    let err = svc
        .list_audit_logs(
            &actor,
            ListAuditLogsQuery {
                force: true,
                ..query()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)));

    // Recovery: the caller retries with force and gets fresh data.
    repo.fail_reads.store(false, Ordering::SeqCst);
    let retried = svc
        .list_audit_logs(
            &actor,
            ListAuditLogsQuery {
                force: true,
                ..query()
            },
        )
        .await
        .unwrap();
    assert_eq!(retried.items.len(), 1);
}

#[tokio::test]
async fn audit_read_requires_the_capability() {
    let repo = Arc::new(MockAuditRepo::default());
    let svc = service(repo);

    let err = svc
        .list_audit_logs(&editor_actor(2), query())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}
