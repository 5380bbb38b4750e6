// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleBody, ArticleId, ArticleSlug, ArticleTitle, Destination, FaqEntry, SeoMetadata,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub summary: Option<String>,
    pub body: ArticleBody,
    pub destinations: Vec<Destination>,
    pub faqs: Vec<FaqEntry>,
    pub seo: SeoMetadata,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published = true;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.published = false;
        self.published_at = None;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub summary: Option<String>,
    pub body: ArticleBody,
    pub destinations: Vec<Destination>,
    pub faqs: Vec<FaqEntry>,
    pub seo: SeoMetadata,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PublishStateUpdate {
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial update; `original_updated_at` is the optimistic-concurrency token.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub slug: Option<ArticleSlug>,
    pub summary: Option<Option<String>>,
    pub body: Option<ArticleBody>,
    pub destinations: Option<Vec<Destination>>,
    pub faqs: Option<Vec<FaqEntry>>,
    pub seo: Option<SeoMetadata>,
    pub publish_state: Option<PublishStateUpdate>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            summary: None,
            body: None,
            destinations: None,
            faqs: None,
            seo: None,
            publish_state: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<Destination>) -> Self {
        self.destinations = Some(destinations);
        self
    }

    pub fn with_faqs(mut self, faqs: Vec<FaqEntry>) -> Self {
        self.faqs = Some(faqs);
        self
    }

    pub fn with_seo(mut self, seo: SeoMetadata) -> Self {
        self.seo = Some(seo);
        self
    }

    pub fn with_publish_state(
        mut self,
        published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.publish_state = Some(PublishStateUpdate {
            published,
            published_at,
        });
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            id: ArticleId::new(1).unwrap(),
            title: ArticleTitle::new("Three days in Kyoto").unwrap(),
            slug: ArticleSlug::new("three-days-in-kyoto").unwrap(),
            summary: None,
            body: ArticleBody::new("Start at Fushimi Inari before sunrise.").unwrap(),
            destinations: vec![Destination::new("Kyoto", "Japan", None).unwrap()],
            faqs: vec![],
            seo: SeoMetadata::default(),
            published: false,
            published_at: None,
            author_id: UserId::new(1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn publish_sets_state() {
        let mut article = sample_article();
        let now = Utc::now();
        article.publish(now);
        assert!(article.published);
        assert_eq!(article.published_at, Some(now));
        assert_eq!(article.updated_at, now);
    }

    #[test]
    fn unpublish_clears_timestamp() {
        let mut article = sample_article();
        let now = Utc::now();
        article.publish(now);
        let later = now + chrono::Duration::seconds(10);
        article.unpublish(later);
        assert!(!article.published);
        assert!(article.published_at.is_none());
        assert_eq!(article.updated_at, later);
    }
}
