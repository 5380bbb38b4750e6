use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use wayfarer_core::application::commands::advertisements::{
    ActivateAdvertisementCommand, AdvertisementCommandService, CancelAdvertisementCommand,
    PurchaseAdvertisementCommand, RecordEngagementCommand, RestoreAdvertisementCommand,
};
use wayfarer_core::application::error::ApplicationError;
use wayfarer_core::application::ports::time::Clock;
use wayfarer_core::application::queries::advertisements::{
    AdvertisementQueryService, GetAdvertisementQuery, ListAdvertisementsQuery,
};
use wayfarer_core::domain::advertisement::EngagementKind;

mod support;
use support::{
    FixedClock, MockAdRepo, MockArticleRepo, MockAuditRepo, admin_actor, editor_actor,
    sample_article,
};

struct Harness {
    commands: AdvertisementCommandService,
    queries: AdvertisementQueryService,
    audit_repo: Arc<MockAuditRepo>,
    clock: Arc<FixedClock>,
}

fn harness() -> Harness {
    let ad_repo = Arc::new(MockAdRepo::default());
    let audit_repo = Arc::new(MockAuditRepo::default());
    let article_repo = Arc::new(MockArticleRepo::with_articles(vec![sample_article(
        1, 1,
    )]));
    let clock = Arc::new(FixedClock::at(
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(),
    ));

    Harness {
        commands: AdvertisementCommandService::new(
            Arc::clone(&ad_repo) as _,
            article_repo as _,
            Arc::clone(&audit_repo) as _,
            Arc::clone(&clock) as _,
        ),
        queries: AdvertisementQueryService::new(
            Arc::clone(&ad_repo) as _,
            Arc::clone(&clock) as _,
        ),
        audit_repo,
        clock,
    }
}

fn purchase_command() -> PurchaseAdvertisementCommand {
    PurchaseAdvertisementCommand {
        article_id: 1,
        plan_name: "Featured guide".into(),
        placements: vec!["home_banner".into(), "search_sidebar".into()],
        price: Decimal::new(4900, 2),
        currency: "EUR".into(),
        duration_days: 2,
        start_at: None,
        end_at: None,
    }
}

fn list_query(include_deleted: bool) -> ListAdvertisementsQuery {
    ListAdvertisementsQuery {
        article_id: None,
        status: None,
        include_deleted,
        limit: 20,
        cursor: None,
    }
}

#[tokio::test]
async fn purchased_ad_starts_as_inactive_draft_with_frozen_terms() {
    let h = harness();
    let actor = admin_actor(1);

    let ad = h.commands.purchase(&actor, purchase_command()).await.unwrap();

    assert_eq!(ad.status, "draft");
    assert!(!ad.is_active);
    assert_eq!(ad.expires_at, None, "unstarted ads never expire");
    assert_eq!(ad.snapshot.plan_name, "Featured guide");
    assert_eq!(ad.snapshot.duration_days, 2);
    assert_eq!(h.audit_repo.logs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn purchase_against_unknown_article_is_rejected() {
    let h = harness();
    let err = h
        .commands
        .purchase(
            &admin_actor(1),
            PurchaseAdvertisementCommand {
                article_id: 99,
                ..purchase_command()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn activation_opens_the_serving_window() {
    let h = harness();
    let actor = admin_actor(1);
    let now = h.clock.now();

    let ad = h.commands.purchase(&actor, purchase_command()).await.unwrap();
    let activated = h
        .commands
        .activate(
            &actor,
            ActivateAdvertisementCommand {
                id: ad.id,
                start_at: Some(now - Duration::hours(1)),
                end_at: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(activated.status, "active");
    assert!(activated.is_active);
    // No explicit end: expiry comes from the purchased duration.
    assert_eq!(
        activated.expires_at,
        Some(now - Duration::hours(1) + Duration::days(2))
    );
}

#[tokio::test]
async fn cancelled_ad_disappears_from_default_reads_and_comes_back_on_restore() {
    let h = harness();
    let actor = admin_actor(1);

    let ad = h.commands.purchase(&actor, purchase_command()).await.unwrap();

    let cancelled = h
        .commands
        .cancel(&actor, CancelAdvertisementCommand { id: ad.id })
        .await
        .unwrap()
        .expect("known id");
    assert!(cancelled.is_deleted);
    assert_eq!(cancelled.deleted_by, Some(1));

    // Default visibility: gone.
    let err = h
        .queries
        .get_advertisement(
            &actor,
            GetAdvertisementQuery {
                id: ad.id,
                include_deleted: false,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
    assert_eq!(h.queries.list_advertisements(&actor, list_query(false)).await.unwrap().total, Some(0));

    // Explicit opt-in: still there, flagged deleted.
    let found = h
        .queries
        .get_advertisement(
            &actor,
            GetAdvertisementQuery {
                id: ad.id,
                include_deleted: true,
            },
        )
        .await
        .unwrap();
    assert!(found.is_deleted);

    // Restore re-includes it in default reads.
    let restored = h
        .commands
        .restore(&actor, RestoreAdvertisementCommand { id: ad.id })
        .await
        .unwrap()
        .expect("known id");
    assert!(!restored.is_deleted);
    assert!(restored.deleted_at.is_none());
    assert_eq!(
        h.queries
            .list_advertisements(&actor, list_query(false))
            .await
            .unwrap()
            .total,
        Some(1)
    );
}

#[tokio::test]
async fn cancelling_twice_is_a_noop_success() {
    let h = harness();
    let actor = admin_actor(1);

    let ad = h.commands.purchase(&actor, purchase_command()).await.unwrap();

    let first = h
        .commands
        .cancel(&actor, CancelAdvertisementCommand { id: ad.id })
        .await
        .unwrap()
        .unwrap();
    let first_deleted_at = first.deleted_at;

    h.clock.advance(Duration::hours(2));
    let second = h
        .commands
        .cancel(&actor, CancelAdvertisementCommand { id: ad.id })
        .await
        .unwrap()
        .unwrap();

    assert!(second.is_deleted);
    assert_eq!(
        second.deleted_at, first_deleted_at,
        "repeat cancel must keep the original tombstone"
    );
    // One purchase entry plus exactly one cancellation entry.
    assert_eq!(h.audit_repo.logs.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn cancel_and_restore_of_unknown_ids_return_none() {
    let h = harness();
    let actor = admin_actor(1);

    let cancelled = h
        .commands
        .cancel(&actor, CancelAdvertisementCommand { id: 404 })
        .await
        .unwrap();
    assert!(cancelled.is_none());

    let restored = h
        .commands
        .restore(&actor, RestoreAdvertisementCommand { id: 404 })
        .await
        .unwrap();
    assert!(restored.is_none());
}

#[tokio::test]
async fn editors_cannot_touch_other_buyers_ads_or_restore() {
    let h = harness();
    let buyer = admin_actor(1);
    let other = editor_actor(2);

    let ad = h.commands.purchase(&buyer, purchase_command()).await.unwrap();

    let err = h
        .commands
        .cancel(&other, CancelAdvertisementCommand { id: ad.id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    h.commands
        .cancel(&buyer, CancelAdvertisementCommand { id: ad.id })
        .await
        .unwrap();

    // Restore is an admin capability, whoever the buyer was.
    let err = h
        .commands
        .restore(&other, RestoreAdvertisementCommand { id: ad.id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn include_deleted_listing_requires_the_capability() {
    let h = harness();
    let err = h
        .queries
        .list_advertisements(&editor_actor(2), list_query(true))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn expired_ads_cannot_be_reactivated() {
    let h = harness();
    let actor = admin_actor(1);
    let now = h.clock.now();

    let ad = h.commands.purchase(&actor, purchase_command()).await.unwrap();
    let served = h
        .commands
        .activate(
            &actor,
            ActivateAdvertisementCommand {
                id: ad.id,
                start_at: Some(now - Duration::days(3)),
                end_at: Some(now - Duration::days(1)),
            },
        )
        .await
        .unwrap();
    assert!(!served.is_active, "window already over");

    let err = h
        .commands
        .activate(
            &actor,
            ActivateAdvertisementCommand {
                id: ad.id,
                start_at: None,
                end_at: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));

    // The missed expiry got stamped onto the record.
    let fetched = h
        .queries
        .get_advertisement(
            &actor,
            GetAdvertisementQuery {
                id: ad.id,
                include_deleted: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(fetched.status, "expired");
}

#[tokio::test]
async fn engagement_counters_ignore_cancelled_ads() {
    let h = harness();
    let actor = admin_actor(1);

    let ad = h.commands.purchase(&actor, purchase_command()).await.unwrap();
    h.commands
        .record_engagement(RecordEngagementCommand {
            id: ad.id,
            kind: EngagementKind::Impression,
        })
        .await
        .unwrap();
    h.commands
        .record_engagement(RecordEngagementCommand {
            id: ad.id,
            kind: EngagementKind::Click,
        })
        .await
        .unwrap();

    let fetched = h
        .queries
        .get_advertisement(
            &actor,
            GetAdvertisementQuery {
                id: ad.id,
                include_deleted: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(fetched.impressions, 1);
    assert_eq!(fetched.clicks, 1);

    h.commands
        .cancel(&actor, CancelAdvertisementCommand { id: ad.id })
        .await
        .unwrap();

    let err = h
        .commands
        .record_engagement(RecordEngagementCommand {
            id: ad.id,
            kind: EngagementKind::Impression,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

/// The walkthrough from the product notes: draft → active with a 2-day
/// duration → soft-deleted, visible only with the explicit opt-in.
#[tokio::test]
async fn full_lifecycle_walkthrough() {
    let h = harness();
    let actor = admin_actor(1);
    let now = h.clock.now();

    let ad = h.commands.purchase(&actor, purchase_command()).await.unwrap();
    assert!(!ad.is_active);

    let activated = h
        .commands
        .activate(
            &actor,
            ActivateAdvertisementCommand {
                id: ad.id,
                start_at: Some(now - Duration::hours(1)),
                end_at: None,
            },
        )
        .await
        .unwrap();
    assert!(activated.is_active);
    assert_eq!(
        activated.expires_at,
        Some(now + Duration::hours(47)),
        "expiry = start + 48h"
    );

    h.commands
        .cancel(&actor, CancelAdvertisementCommand { id: ad.id })
        .await
        .unwrap();

    let err = h
        .queries
        .get_advertisement(
            &actor,
            GetAdvertisementQuery {
                id: ad.id,
                include_deleted: false,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let tombstoned = h
        .queries
        .get_advertisement(
            &actor,
            GetAdvertisementQuery {
                id: ad.id,
                include_deleted: true,
            },
        )
        .await
        .unwrap();
    assert!(tombstoned.is_deleted);
}
