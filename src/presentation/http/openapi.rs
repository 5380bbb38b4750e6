// src/presentation/http/openapi.rs
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::dto::{
    AdvertisementDto, ArticleDto, AuditLogDto, AuthTokenDto, CapabilityView, CursorPage,
    DestinationDto, FaqEntryDto, PlanSnapshotDto, SeoMetadataDto, StatusTotalDto, UserDto,
    UserProfileDto,
};
use crate::presentation::http::controllers::{advertisements, articles, audit, auth};
use crate::presentation::http::error::ErrorBody;
use crate::presentation::http::routes;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        auth::register,
        auth::login,
        auth::profile,
        auth::update_profile,
        auth::change_password,
        articles::list_articles,
        articles::get_article_by_slug,
        articles::get_article_by_id,
        articles::create_article,
        articles::update_article,
        articles::delete_article,
        articles::set_publish_state,
        advertisements::list_ads,
        advertisements::status_totals,
        advertisements::get_ad,
        advertisements::purchase_ad,
        advertisements::activate_ad,
        advertisements::cancel_ad,
        advertisements::restore_ad,
        advertisements::record_engagement,
        audit::list_audit_logs,
    ),
    components(schemas(
        StatusResponse,
        ErrorBody,
        AuthTokenDto,
        UserDto,
        UserProfileDto,
        CapabilityView,
        ArticleDto,
        DestinationDto,
        FaqEntryDto,
        SeoMetadataDto,
        AdvertisementDto,
        PlanSnapshotDto,
        StatusTotalDto,
        AuditLogDto,
        CursorPage<ArticleDto>,
        CursorPage<AdvertisementDto>,
        CursorPage<AuditLogDto>,
    )),
    tags(
        (name = "System", description = "Health and metadata"),
        (name = "Auth", description = "Accounts, sessions, profile"),
        (name = "Articles", description = "Travel guides and articles"),
        (name = "Advertisements", description = "Purchased placements"),
        (name = "Audit", description = "Immutable audit trail"),
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
}
