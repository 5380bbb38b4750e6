// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        CreateArticleCommand, DeleteArticleCommand, DestinationInput, FaqInput,
        SetPublishStateCommand, SeoInput, UpdateArticleCommand,
    },
    dto::{ArticleDto, CursorPage},
    queries::articles::{GetArticleByIdQuery, GetArticleBySlugQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ArticleListParams {
    #[serde(default)]
    pub include_drafts: bool,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DestinationPayload {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<DestinationPayload> for DestinationInput {
    fn from(payload: DestinationPayload) -> Self {
        Self {
            name: payload.name,
            country: payload.country,
            description: payload.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FaqPayload {
    pub question: String,
    pub answer: String,
}

impl From<FaqPayload> for FaqInput {
    fn from(payload: FaqPayload) -> Self {
        Self {
            question: payload.question,
            answer: payload.answer,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SeoPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl From<SeoPayload> for SeoInput {
    fn from(payload: SeoPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            keywords: payload.keywords,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub body: String,
    #[serde(default)]
    pub destinations: Vec<DestinationPayload>,
    #[serde(default)]
    pub faqs: Vec<FaqPayload>,
    #[serde(default)]
    pub seo: Option<SeoPayload>,
    #[serde(default)]
    pub publish: bool,
}

/// `summary: null` clears the field; omitting it leaves it untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    pub body: Option<String>,
    pub destinations: Option<Vec<DestinationPayload>>,
    pub faqs: Option<Vec<FaqPayload>>,
    pub seo: Option<SeoPayload>,
}

mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRequest {
    pub publish: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Page of articles, newest first.", body = CursorPage<ArticleDto>)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<CursorPage<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_articles(
            actor.0.as_ref(),
            ListArticlesQuery {
                include_drafts: params.include_drafts,
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
    path = "/api/v1/articles/by-slug/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "The article.", body = ArticleDto),
        (status = 404, description = "Unknown slug or unpublished draft.")
    ),
    tag = "Articles"
)]
pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_slug(actor.0.as_ref(), GetArticleBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article.", body = ArticleDto),
        (status = 404, description = "Unknown id or unpublished draft.")
    ),
    tag = "Articles"
)]
pub async fn get_article_by_id(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(actor.0.as_ref(), GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 200, description = "Article created.", body = ArticleDto)
    ),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = CreateArticleCommand {
        title: payload.title,
        summary: payload.summary,
        body: payload.body,
        destinations: payload.destinations.into_iter().map(Into::into).collect(),
        faqs: payload.faqs.into_iter().map(Into::into).collect(),
        seo: payload.seo.map(Into::into),
        publish: payload.publish,
    };

    state
        .services
        .article_commands
        .create_article(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated.", body = ArticleDto),
        (status = 409, description = "Concurrent edit detected.")
    ),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        id,
        title: payload.title,
        summary: payload.summary,
        body: payload.body,
        destinations: payload
            .destinations
            .map(|ds| ds.into_iter().map(Into::into).collect()),
        faqs: payload.faqs.map(|fs| fs.into_iter().map(Into::into).collect()),
        seo: payload.seo.map(Into::into),
    };

    state
        .services
        .article_commands
        .update_article(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article deleted."),
        (status = 404, description = "Unknown id.")
    ),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .article_commands
        .delete_article(&user, DeleteArticleCommand { id })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deleted" })))
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/publish",
    params(("id" = i64, Path, description = "Article id")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Publish state changed.", body = ArticleDto)
    ),
    tag = "Articles"
)]
pub async fn set_publish_state(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<PublishRequest>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .set_publish_state(
            &user,
            SetPublishStateCommand {
                id,
                publish: payload.publish,
            },
        )
        .await
        .into_http()
        .map(Json)
}
