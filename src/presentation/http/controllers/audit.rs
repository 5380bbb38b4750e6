// src/presentation/http/controllers/audit.rs
use crate::application::{
    dto::{AuditLogDto, CursorPage},
    queries::audit::ListAuditLogsQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditListParams {
    /// Exact calendar day (UTC). Takes precedence over the range fields.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
    /// Bypass the staleness cache for this request.
    #[serde(default)]
    pub force: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/audit",
    params(AuditListParams),
    responses(
        (status = 200, description = "Page of audit records, newest first.", body = CursorPage<AuditLogDto>),
        (status = 400, description = "Inverted date range or malformed cursor."),
        (status = 403, description = "Missing audit:read capability.")
    ),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<AuditListParams>,
) -> HttpResult<Json<CursorPage<AuditLogDto>>> {
    state
        .services
        .audit_queries
        .list_audit_logs(
            &actor,
            ListAuditLogsQuery {
                date: params.date,
                start_date: params.start_date,
                end_date: params.end_date,
                limit: params.limit,
                cursor: params.cursor,
                force: params.force,
            },
        )
        .await
        .into_http()
        .map(Json)
}
