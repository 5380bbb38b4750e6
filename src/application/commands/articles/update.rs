// src/application/commands/articles/update.rs
use super::{
    ArticleCommandService,
    capability::ensure_can_touch,
    create::{DestinationInput, FaqInput, SeoInput, build_destinations, build_faqs, build_seo},
};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleBody, ArticleId, ArticleTitle, ArticleUpdate},
};

pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub summary: Option<Option<String>>,
    pub body: Option<String>,
    pub destinations: Option<Vec<DestinationInput>>,
    pub faqs: Option<Vec<FaqInput>>,
    pub seo: Option<SeoInput>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        ensure_can_touch(actor, "update", existing.author_id)?;

        let mut update = ArticleUpdate::new(id, existing.updated_at);

        if let Some(title) = command.title {
            let title = ArticleTitle::new(title)?;
            // A renamed article keeps its slug stable once published;
            // drafts follow the new title.
            if !existing.published {
                let slug = self.generate_unique_slug(&title).await?;
                update = update.with_slug(slug);
            }
            update = update.with_title(title);
        }

        if let Some(summary) = command.summary {
            update = update.with_summary(
                summary
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            );
        }

        if let Some(body) = command.body {
            update = update.with_body(ArticleBody::new(body)?);
        }

        if let Some(destinations) = command.destinations {
            update = update.with_destinations(build_destinations(destinations)?);
        }

        if let Some(faqs) = command.faqs {
            update = update.with_faqs(build_faqs(faqs)?);
        }

        if let Some(seo) = command.seo {
            update = update.with_seo(build_seo(Some(seo)));
        }

        update.set_updated_at(self.clock.now());

        let updated = self.write_repo.update(update).await?;
        Ok(updated.into())
    }
}
