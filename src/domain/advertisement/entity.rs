// src/domain/advertisement/entity.rs
use crate::domain::advertisement::value_objects::{AdStatus, AdvertisementId, PlanSnapshot};
use crate::domain::article::ArticleId;
use crate::domain::user::UserId;
use chrono::{DateTime, Duration, Utc};

/// A purchased promotional placement for a guide. The plan terms live in
/// `snapshot` and never change after purchase; cancellation keeps the row
/// around via the soft-delete triple.
#[derive(Debug, Clone)]
pub struct Advertisement {
    pub id: AdvertisementId,
    pub article_id: ArticleId,
    pub buyer_id: UserId,
    pub snapshot: PlanSnapshot,
    pub status: AdStatus,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub impressions: i64,
    pub clicks: i64,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advertisement {
    /// Serving check: Active status and `now` inside the validity window.
    /// A missing bound leaves that side open.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == AdStatus::Active
            && self.start_at.is_none_or(|start| start <= now)
            && self.end_at.is_none_or(|end| end > now)
    }

    /// `end_at` when set, otherwise `start_at` plus the purchased duration.
    /// An ad that never started never expires.
    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.end_at.or_else(|| {
            self.start_at
                .map(|start| start + Duration::days(self.snapshot.duration_days))
        })
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Debug, Clone)]
pub struct NewAdvertisement {
    pub article_id: ArticleId,
    pub buyer_id: UserId,
    pub snapshot: PlanSnapshot,
    pub status: AdStatus,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Replacement validity window. Both sides are set together so a partial
/// update can never produce an inverted window unseen.
#[derive(Debug, Clone, Copy)]
pub struct ServingWindow {
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct AdvertisementUpdate {
    pub id: AdvertisementId,
    pub status: Option<AdStatus>,
    pub window: Option<ServingWindow>,
    pub updated_at: DateTime<Utc>,
}

impl AdvertisementUpdate {
    pub fn new(id: AdvertisementId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: None,
            window: None,
            updated_at,
        }
    }

    pub fn with_status(mut self, status: AdStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_window(mut self, window: ServingWindow) -> Self {
        self.window = Some(window);
        self
    }
}
