// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{advertisements, articles, audit, auth},
    middleware::{audit::audit_middleware, rate_limit::rate_limit_layer},
    openapi,
};
use axum::{
    Extension, Router,
    http::Method,
    middleware::from_fn,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    let credential_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .layer(rate_limit_layer());

    Router::new()
        .merge(openapi::docs_router())
        .merge(credential_routes)
        .route("/health", get(health))
        .route(
            "/api/v1/auth/me",
            get(auth::profile).patch(auth::update_profile),
        )
        .route(
            "/api/v1/users/{id}/change-password",
            post(auth::change_password),
        )
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/articles/by-slug/{slug}",
            get(articles::get_article_by_slug),
        )
        .route(
            "/api/v1/articles/{id}",
            get(articles::get_article_by_id)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/api/v1/articles/{id}/publish",
            post(articles::set_publish_state),
        )
        .route(
            "/api/v1/ads",
            get(advertisements::list_ads).post(advertisements::purchase_ad),
        )
        .route("/api/v1/ads/totals", get(advertisements::status_totals))
        .route("/api/v1/ads/{id}", get(advertisements::get_ad))
        .route("/api/v1/ads/{id}/activate", post(advertisements::activate_ad))
        .route("/api/v1/ads/{id}/cancel", post(advertisements::cancel_ad))
        .route("/api/v1/ads/{id}/restore", post(advertisements::restore_ad))
        .route(
            "/api/v1/ads/{id}/events",
            post(advertisements::record_engagement),
        )
        .route("/api/v1/audit", get(audit::list_audit_logs))
        .layer(from_fn(audit_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<openapi::StatusResponse> {
    axum::Json(openapi::StatusResponse {
        status: "ok".into(),
    })
}
