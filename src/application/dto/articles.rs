use crate::domain::article::{Article, Destination, FaqEntry, SeoMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DestinationDto {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Destination> for DestinationDto {
    fn from(destination: Destination) -> Self {
        Self {
            name: destination.name,
            country: destination.country,
            description: destination.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaqEntryDto {
    pub question: String,
    pub answer: String,
}

impl From<FaqEntry> for FaqEntryDto {
    fn from(faq: FaqEntry) -> Self {
        Self {
            question: faq.question,
            answer: faq.answer,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SeoMetadataDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl From<SeoMetadata> for SeoMetadataDto {
    fn from(seo: SeoMetadata) -> Self {
        Self {
            title: seo.title,
            description: seo.description,
            keywords: seo.keywords,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body: String,
    pub destinations: Vec<DestinationDto>,
    pub faqs: Vec<FaqEntryDto>,
    pub seo: SeoMetadataDto,
    pub published: bool,
    #[serde(default, with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            summary: article.summary,
            body: article.body.into_inner(),
            destinations: article.destinations.into_iter().map(Into::into).collect(),
            faqs: article.faqs.into_iter().map(Into::into).collect(),
            seo: article.seo.into(),
            published: article.published,
            published_at: article.published_at,
            author_id: article.author_id.into(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
