// src/infrastructure/repositories/postgres_advertisement.rs
use super::map_sqlx;
use crate::domain::advertisement::{
    AdStatus, Advertisement, AdvertisementCursor, AdvertisementId, AdvertisementListFilter,
    AdvertisementRepository, AdvertisementUpdate, DeletedVisibility, NewAdvertisement,
    PlanSnapshot, StatusTotal,
};
use crate::domain::article::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresAdvertisementRepository {
    pool: PgPool,
}

impl PostgresAdvertisementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const AD_COLUMNS: &str = "id, article_id, buyer_id, snapshot, status, start_at, end_at, \
     impressions, clicks, is_deleted, deleted_at, deleted_by, created_at, updated_at";

#[derive(Debug, FromRow)]
struct AdvertisementRow {
    id: i64,
    article_id: i64,
    buyer_id: i64,
    snapshot: serde_json::Value,
    status: String,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    impressions: i64,
    clicks: i64,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    deleted_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdvertisementRow> for Advertisement {
    type Error = DomainError;

    fn try_from(row: AdvertisementRow) -> Result<Self, Self::Error> {
        let snapshot: PlanSnapshot = serde_json::from_value(row.snapshot)
            .map_err(|err| DomainError::Persistence(format!("corrupt snapshot column: {err}")))?;
        Ok(Advertisement {
            id: AdvertisementId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            buyer_id: UserId::new(row.buyer_id)?,
            snapshot,
            status: row.status.parse::<AdStatus>()?,
            start_at: row.start_at,
            end_at: row.end_at,
            impressions: row.impressions,
            clicks: row.clicks,
            is_deleted: row.is_deleted,
            deleted_at: row.deleted_at,
            deleted_by: row.deleted_by.map(UserId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Adds `is_deleted = FALSE` for `ActiveOnly` reads. Every read path below
/// goes through here; that is the whole soft-delete contract.
fn push_visibility(
    builder: &mut QueryBuilder<'_, Postgres>,
    visibility: DeletedVisibility,
    has_where: &mut bool,
) {
    if visibility == DeletedVisibility::IncludeDeleted {
        return;
    }
    if *has_where {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_where = true;
    }
    builder.push("is_deleted = FALSE");
}

fn push_filter(
    builder: &mut QueryBuilder<'_, Postgres>,
    filter: &AdvertisementListFilter,
    has_where: &mut bool,
) {
    if let Some(article_id) = filter.article_id {
        if *has_where {
            builder.push(" AND ");
        } else {
            builder.push(" WHERE ");
            *has_where = true;
        }
        builder.push("article_id = ");
        builder.push_bind(i64::from(article_id));
    }

    if let Some(status) = filter.status {
        if *has_where {
            builder.push(" AND ");
        } else {
            builder.push(" WHERE ");
            *has_where = true;
        }
        builder.push("status = ");
        builder.push_bind(status.as_str());
    }
}

#[async_trait]
impl AdvertisementRepository for PostgresAdvertisementRepository {
    async fn insert(&self, ad: NewAdvertisement) -> DomainResult<Advertisement> {
        let snapshot = serde_json::to_value(&ad.snapshot)
            .map_err(|err| DomainError::Persistence(format!("could not encode snapshot: {err}")))?;

        let row = sqlx::query_as::<_, AdvertisementRow>(&format!(
            "INSERT INTO advertisements (article_id, buyer_id, snapshot, status, start_at, end_at, \
             created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {AD_COLUMNS}"
        ))
        .bind(i64::from(ad.article_id))
        .bind(i64::from(ad.buyer_id))
        .bind(snapshot)
        .bind(ad.status.as_str())
        .bind(ad.start_at)
        .bind(ad.end_at)
        .bind(ad.created_at)
        .bind(ad.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Advertisement::try_from(row)
    }

    async fn find_by_id(
        &self,
        id: AdvertisementId,
        visibility: DeletedVisibility,
    ) -> DomainResult<Option<Advertisement>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {AD_COLUMNS} FROM advertisements"));
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        let mut has_where = true;
        push_visibility(&mut builder, visibility, &mut has_where);

        let row = builder
            .build_query_as::<AdvertisementRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Advertisement::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: AdvertisementListFilter,
        visibility: DeletedVisibility,
        limit: u32,
        cursor: Option<AdvertisementCursor>,
    ) -> DomainResult<(Vec<Advertisement>, Option<AdvertisementCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = (limit as i64) + 1;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {AD_COLUMNS} FROM advertisements"));
        let mut has_where = false;
        push_visibility(&mut builder, visibility, &mut has_where);
        push_filter(&mut builder, &filter, &mut has_where);

        if let Some(cursor) = cursor.as_ref() {
            if has_where {
                builder.push(" AND ");
            } else {
                builder.push(" WHERE ");
            }
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(i64::from(cursor.ad_id));
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<AdvertisementRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut ads = rows
            .into_iter()
            .map(Advertisement::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_cursor = None;
        if ads.len() > limit as usize {
            ads.pop();
            if let Some(last) = ads.last() {
                next_cursor = Some(AdvertisementCursor::from_parts(last.created_at, last.id));
            }
        }

        Ok((ads, next_cursor))
    }

    async fn count(
        &self,
        filter: AdvertisementListFilter,
        visibility: DeletedVisibility,
    ) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM advertisements");
        let mut has_where = false;
        push_visibility(&mut builder, visibility, &mut has_where);
        push_filter(&mut builder, &filter, &mut has_where);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(count as u64)
    }

    async fn status_totals(&self, visibility: DeletedVisibility) -> DomainResult<Vec<StatusTotal>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT status, COUNT(*) AS count FROM advertisements");
        let mut has_where = false;
        push_visibility(&mut builder, visibility, &mut has_where);
        builder.push(" GROUP BY status ORDER BY status");

        let rows: Vec<(String, i64)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|(status, count)| {
                Ok(StatusTotal {
                    status: status.parse::<AdStatus>()?,
                    count: count as u64,
                })
            })
            .collect()
    }

    async fn update(&self, update: AdvertisementUpdate) -> DomainResult<Option<Advertisement>> {
        let AdvertisementUpdate {
            id,
            status,
            window,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE advertisements SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(status) = status {
            builder.push(", status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(window) = window {
            builder.push(", start_at = ");
            builder.push_bind(window.start_at);
            builder.push(", end_at = ");
            builder.push_bind(window.end_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {AD_COLUMNS}"));

        let maybe_row = builder
            .build_query_as::<AdvertisementRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        maybe_row.map(Advertisement::try_from).transpose()
    }

    async fn soft_delete(
        &self,
        id: AdvertisementId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Advertisement>> {
        // COALESCE keeps the original tombstone when the record is already
        // deleted, making repeated cancellation a no-op.
        let row = sqlx::query_as::<_, AdvertisementRow>(&format!(
            "UPDATE advertisements
             SET is_deleted = TRUE,
                 deleted_at = COALESCE(deleted_at, $2),
                 deleted_by = COALESCE(deleted_by, $3),
                 updated_at = CASE WHEN is_deleted THEN updated_at ELSE $2 END
             WHERE id = $1
             RETURNING {AD_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(now)
        .bind(i64::from(actor))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Advertisement::try_from).transpose()
    }

    async fn restore(
        &self,
        id: AdvertisementId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Advertisement>> {
        let row = sqlx::query_as::<_, AdvertisementRow>(&format!(
            "UPDATE advertisements
             SET is_deleted = FALSE,
                 deleted_at = NULL,
                 deleted_by = NULL,
                 updated_at = CASE WHEN is_deleted THEN $2 ELSE updated_at END
             WHERE id = $1
             RETURNING {AD_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Advertisement::try_from).transpose()
    }

    async fn record_impression(&self, id: AdvertisementId) -> DomainResult<()> {
        sqlx::query("UPDATE advertisements SET impressions = impressions + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn record_click(&self, id: AdvertisementId) -> DomainResult<()> {
        sqlx::query("UPDATE advertisements SET clicks = clicks + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
