// src/presentation/http/controllers/advertisements.rs
use crate::application::{
    commands::advertisements::{
        ActivateAdvertisementCommand, CancelAdvertisementCommand, PurchaseAdvertisementCommand,
        RecordEngagementCommand, RestoreAdvertisementCommand,
    },
    dto::{AdvertisementDto, CursorPage, StatusTotalDto},
    queries::advertisements::{GetAdvertisementQuery, ListAdvertisementsQuery, StatusTotalsQuery},
};
use crate::domain::advertisement::EngagementKind;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AdListParams {
    #[serde(default)]
    pub article_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub include_deleted: bool,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AdGetParams {
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseAdRequest {
    pub article_id: i64,
    pub plan_name: String,
    pub placements: Vec<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub currency: String,
    pub duration_days: i64,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ActivateAdRequest {
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EngagementRequest {
    #[schema(value_type = String, example = "impression")]
    pub kind: EngagementKind,
}

#[utoipa::path(
    get,
    path = "/api/v1/ads",
    params(AdListParams),
    responses(
        (status = 200, description = "Page of advertisements, newest first.", body = CursorPage<AdvertisementDto>),
        (status = 403, description = "include_deleted without ads:view:deleted.")
    ),
    tag = "Advertisements"
)]
pub async fn list_ads(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<AdListParams>,
) -> HttpResult<Json<CursorPage<AdvertisementDto>>> {
    state
        .services
        .ad_queries
        .list_advertisements(
            &actor,
            ListAdvertisementsQuery {
                article_id: params.article_id,
                status: params.status,
                include_deleted: params.include_deleted,
                limit: params.limit,
                cursor: params.cursor,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/ads/totals",
    params(AdGetParams),
    responses(
        (status = 200, description = "Per-status advertisement counts.", body = [StatusTotalDto])
    ),
    tag = "Advertisements"
)]
pub async fn status_totals(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<AdGetParams>,
) -> HttpResult<Json<Vec<StatusTotalDto>>> {
    state
        .services
        .ad_queries
        .status_totals(
            &actor,
            StatusTotalsQuery {
                include_deleted: params.include_deleted,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/ads/{id}",
    params(("id" = i64, Path, description = "Advertisement id"), AdGetParams),
    responses(
        (status = 200, description = "The advertisement.", body = AdvertisementDto),
        (status = 404, description = "Unknown id, or soft-deleted without include_deleted.")
    ),
    tag = "Advertisements"
)]
pub async fn get_ad(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Query(params): Query<AdGetParams>,
) -> HttpResult<Json<AdvertisementDto>> {
    state
        .services
        .ad_queries
        .get_advertisement(
            &actor,
            GetAdvertisementQuery {
                id,
                include_deleted: params.include_deleted,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/ads",
    request_body = PurchaseAdRequest,
    responses(
        (status = 200, description = "Draft advertisement created with frozen plan terms.", body = AdvertisementDto),
        (status = 404, description = "Promoted article does not exist.")
    ),
    tag = "Advertisements"
)]
pub async fn purchase_ad(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(payload): Json<PurchaseAdRequest>,
) -> HttpResult<Json<AdvertisementDto>> {
    state
        .services
        .ad_commands
        .purchase(
            &actor,
            PurchaseAdvertisementCommand {
                article_id: payload.article_id,
                plan_name: payload.plan_name,
                placements: payload.placements,
                price: payload.price,
                currency: payload.currency,
                duration_days: payload.duration_days,
                start_at: payload.start_at,
                end_at: payload.end_at,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/ads/{id}/activate",
    params(("id" = i64, Path, description = "Advertisement id")),
    request_body = ActivateAdRequest,
    responses(
        (status = 200, description = "Advertisement now serving.", body = AdvertisementDto),
        (status = 409, description = "Expired advertisements stay expired.")
    ),
    tag = "Advertisements"
)]
pub async fn activate_ad(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<ActivateAdRequest>,
) -> HttpResult<Json<AdvertisementDto>> {
    state
        .services
        .ad_commands
        .activate(
            &actor,
            ActivateAdvertisementCommand {
                id,
                start_at: payload.start_at,
                end_at: payload.end_at,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/ads/{id}/cancel",
    params(("id" = i64, Path, description = "Advertisement id")),
    responses(
        (status = 200, description = "Soft-deleted record, or null for an unknown id.", body = AdvertisementDto)
    ),
    tag = "Advertisements"
)]
pub async fn cancel_ad(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Option<AdvertisementDto>>> {
    state
        .services
        .ad_commands
        .cancel(&actor, CancelAdvertisementCommand { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/ads/{id}/restore",
    params(("id" = i64, Path, description = "Advertisement id")),
    responses(
        (status = 200, description = "Restored record, or null for an unknown id.", body = AdvertisementDto)
    ),
    tag = "Advertisements"
)]
pub async fn restore_ad(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Option<AdvertisementDto>>> {
    state
        .services
        .ad_commands
        .restore(&actor, RestoreAdvertisementCommand { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/ads/{id}/events",
    params(("id" = i64, Path, description = "Advertisement id")),
    request_body = EngagementRequest,
    responses(
        (status = 200, description = "Counter recorded."),
        (status = 404, description = "Unknown or cancelled advertisement.")
    ),
    tag = "Advertisements"
)]
pub async fn record_engagement(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<EngagementRequest>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .ad_commands
        .record_engagement(RecordEngagementCommand {
            id,
            kind: payload.kind,
        })
        .await
        .into_http()?;

    Ok(Json(serde_json::json!({ "status": "recorded" })))
}
