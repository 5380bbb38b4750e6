use crate::domain::advertisement::cursor::AdvertisementCursor;
use crate::domain::advertisement::entity::{Advertisement, AdvertisementUpdate, NewAdvertisement};
use crate::domain::advertisement::value_objects::{AdStatus, AdvertisementId, DeletedVisibility};
use crate::domain::article::ArticleId;
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default)]
pub struct AdvertisementListFilter {
    pub article_id: Option<ArticleId>,
    pub status: Option<AdStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTotal {
    pub status: AdStatus,
    pub count: u64,
}

/// Soft-delete scoped store. Every read path takes a [`DeletedVisibility`]
/// and composes `is_deleted = FALSE` into its predicate for `ActiveOnly`;
/// there is no implicit query hook anywhere else.
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    async fn insert(&self, ad: NewAdvertisement) -> DomainResult<Advertisement>;

    async fn find_by_id(
        &self,
        id: AdvertisementId,
        visibility: DeletedVisibility,
    ) -> DomainResult<Option<Advertisement>>;

    async fn list_page(
        &self,
        filter: AdvertisementListFilter,
        visibility: DeletedVisibility,
        limit: u32,
        cursor: Option<AdvertisementCursor>,
    ) -> DomainResult<(Vec<Advertisement>, Option<AdvertisementCursor>)>;

    async fn count(
        &self,
        filter: AdvertisementListFilter,
        visibility: DeletedVisibility,
    ) -> DomainResult<u64>;

    /// Per-status aggregate, honoring the same visibility rule as the
    /// other reads.
    async fn status_totals(&self, visibility: DeletedVisibility) -> DomainResult<Vec<StatusTotal>>;

    /// `None` when the id does not exist. Single-document, last-write-wins.
    async fn update(&self, update: AdvertisementUpdate) -> DomainResult<Option<Advertisement>>;

    /// Sets the soft-delete triple. Idempotent: an already-deleted record
    /// keeps its original `deleted_at`/`deleted_by` and is returned as-is.
    async fn soft_delete(
        &self,
        id: AdvertisementId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Advertisement>>;

    /// Clears the soft-delete triple. Idempotent.
    async fn restore(
        &self,
        id: AdvertisementId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Advertisement>>;

    async fn record_impression(&self, id: AdvertisementId) -> DomainResult<()>;

    async fn record_click(&self, id: AdvertisementId) -> DomainResult<()>;
}
