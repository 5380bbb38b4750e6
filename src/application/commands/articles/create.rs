// src/application/commands/articles/create.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::{
        ArticleBody, ArticleTitle, Destination, FaqEntry, NewArticle, SeoMetadata,
    },
};

#[derive(Debug, Clone)]
pub struct DestinationInput {
    pub name: String,
    pub country: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default)]
pub struct SeoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

pub struct CreateArticleCommand {
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub destinations: Vec<DestinationInput>,
    pub faqs: Vec<FaqInput>,
    pub seo: Option<SeoInput>,
    pub publish: bool,
}

pub(super) fn build_destinations(
    inputs: Vec<DestinationInput>,
) -> crate::domain::errors::DomainResult<Vec<Destination>> {
    inputs
        .into_iter()
        .map(|d| Destination::new(d.name, d.country, d.description))
        .collect()
}

pub(super) fn build_faqs(
    inputs: Vec<FaqInput>,
) -> crate::domain::errors::DomainResult<Vec<FaqEntry>> {
    inputs
        .into_iter()
        .map(|f| FaqEntry::new(f.question, f.answer))
        .collect()
}

pub(super) fn build_seo(input: Option<SeoInput>) -> SeoMetadata {
    let input = input.unwrap_or_default();
    SeoMetadata {
        title: input.title.filter(|t| !t.trim().is_empty()),
        description: input.description.filter(|d| !d.trim().is_empty()),
        keywords: input
            .keywords
            .into_iter()
            .filter(|k| !k.trim().is_empty())
            .collect(),
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "create")?;

        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let destinations = build_destinations(command.destinations)?;
        let faqs = build_faqs(command.faqs)?;
        let seo = build_seo(command.seo);
        let now = self.clock.now();

        let slug = self.generate_unique_slug(&title).await?;

        let new_article = NewArticle {
            title,
            slug,
            summary: command
                .summary
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            body,
            destinations,
            faqs,
            seo,
            published: command.publish,
            published_at: if command.publish { Some(now) } else { None },
            author_id: actor.id,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_article).await?;
        Ok(created.into())
    }
}
