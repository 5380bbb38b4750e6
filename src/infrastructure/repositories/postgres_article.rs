// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleBody, ArticleId, ArticleListCursor, ArticleReadRepository, ArticleSlug,
    ArticleTitle, ArticleUpdate, ArticleWriteRepository, Destination, FaqEntry, NewArticle,
    SeoMetadata,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ARTICLE_COLUMNS: &str = "id, title, slug, summary, body, destinations, faqs, seo, \
     published, published_at, author_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    summary: Option<String>,
    body: String,
    destinations: serde_json::Value,
    faqs: serde_json::Value,
    seo: serde_json::Value,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn decode_json<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    what: &str,
) -> DomainResult<T> {
    serde_json::from_value(value)
        .map_err(|err| DomainError::Persistence(format!("corrupt {what} column: {err}")))
}

fn encode_json<T: serde::Serialize>(value: &T, what: &str) -> DomainResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|err| DomainError::Persistence(format!("could not encode {what}: {err}")))
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            summary: row.summary,
            body: ArticleBody::new(row.body)?,
            destinations: decode_json::<Vec<Destination>>(row.destinations, "destinations")?,
            faqs: decode_json::<Vec<FaqEntry>>(row.faqs, "faqs")?,
            seo: decode_json::<SeoMetadata>(row.seo, "seo")?,
            published: row.published,
            published_at: row.published_at,
            author_id: UserId::new(row.author_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            summary,
            body,
            destinations,
            faqs,
            seo,
            published,
            published_at,
            author_id,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, slug, summary, body, destinations, faqs, seo, \
             published, published_at, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(&summary)
        .bind(body.as_str())
        .bind(encode_json(&destinations, "destinations")?)
        .bind(encode_json(&faqs, "faqs")?)
        .bind(encode_json(&seo, "seo")?)
        .bind(published)
        .bind(published_at)
        .bind(i64::from(author_id))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            slug,
            summary,
            body,
            destinations,
            faqs,
            seo,
            publish_state,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        if let Some(summary) = summary {
            builder.push(", summary = ");
            builder.push_bind(summary);
        }

        if let Some(body) = body {
            builder.push(", body = ");
            builder.push_bind(body.into_inner());
        }

        if let Some(destinations) = destinations {
            builder.push(", destinations = ");
            builder.push_bind(encode_json(&destinations, "destinations")?);
        }

        if let Some(faqs) = faqs {
            builder.push(", faqs = ");
            builder.push_bind(encode_json(&faqs, "faqs")?);
        }

        if let Some(seo) = seo {
            builder.push(", seo = ");
            builder.push_bind(encode_json(&seo, "seo")?);
        }

        if let Some(state) = publish_state {
            builder.push(", published = ");
            builder.push_bind(state.published);
            builder.push(", published_at = ");
            builder.push_bind(state.published_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(format!(" RETURNING {ARTICLE_COLUMNS}"));

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row
            .ok_or_else(|| DomainError::Conflict("article update conflict, please retry".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> DomainResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM articles WHERE slug = $1)")
                .bind(slug.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;
        Ok(exists)
    }

    async fn list_page(
        &self,
        include_drafts: bool,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = (limit as i64) + 1;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));

        let mut has_where = false;
        if !include_drafts {
            builder.push(" WHERE published = TRUE");
            has_where = true;
        }

        if let Some(cursor) = cursor.as_ref() {
            if has_where {
                builder.push(" AND ");
            } else {
                builder.push(" WHERE ");
            }
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(i64::from(cursor.article_id));
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_cursor = None;
        if articles.len() > limit as usize {
            articles.pop();
            if let Some(last) = articles.last() {
                next_cursor = Some(ArticleListCursor::from_parts(last.created_at, last.id));
            }
        }

        Ok((articles, next_cursor))
    }
}
