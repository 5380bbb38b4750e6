use crate::domain::advertisement::{Advertisement, PlanSnapshot, StatusTotal};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanSnapshotDto {
    pub plan_name: String,
    pub placements: Vec<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub currency: String,
    pub duration_days: i64,
}

impl From<PlanSnapshot> for PlanSnapshotDto {
    fn from(snapshot: PlanSnapshot) -> Self {
        Self {
            plan_name: snapshot.plan_name,
            placements: snapshot.placements,
            price: snapshot.price,
            currency: snapshot.currency,
            duration_days: snapshot.duration_days,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvertisementDto {
    pub id: i64,
    pub article_id: i64,
    pub buyer_id: i64,
    pub snapshot: PlanSnapshotDto,
    pub status: String,
    #[serde(default, with = "serde_time::option")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_time::option")]
    pub end_at: Option<DateTime<Utc>>,
    pub impressions: i64,
    pub clicks: i64,
    /// Serving check evaluated at response time.
    pub is_active: bool,
    #[serde(default, with = "serde_time::option")]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    #[serde(default, with = "serde_time::option")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<i64>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl AdvertisementDto {
    pub fn from_entity(ad: Advertisement, now: DateTime<Utc>) -> Self {
        let is_active = ad.is_active(now);
        let expires_at = ad.expiry_date();
        Self {
            id: ad.id.into(),
            article_id: ad.article_id.into(),
            buyer_id: ad.buyer_id.into(),
            snapshot: ad.snapshot.into(),
            status: ad.status.as_str().to_string(),
            start_at: ad.start_at,
            end_at: ad.end_at,
            impressions: ad.impressions,
            clicks: ad.clicks,
            is_active,
            expires_at,
            is_deleted: ad.is_deleted,
            deleted_at: ad.deleted_at,
            deleted_by: ad.deleted_by.map(Into::into),
            created_at: ad.created_at,
            updated_at: ad.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusTotalDto {
    pub status: String,
    pub count: u64,
}

impl From<StatusTotal> for StatusTotalDto {
    fn from(total: StatusTotal) -> Self {
        Self {
            status: total.status.as_str().to_string(),
            count: total.count,
        }
    }
}
