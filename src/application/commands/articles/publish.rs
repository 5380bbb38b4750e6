use super::{ArticleCommandService, capability::ensure_capability, capability::ensure_can_touch};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleId, ArticleUpdate},
};

pub struct SetPublishStateCommand {
    pub id: i64,
    pub publish: bool,
}

impl ArticleCommandService {
    pub async fn set_publish_state(
        &self,
        actor: &AuthenticatedUser,
        command: SetPublishStateCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "publish")?;

        let id = ArticleId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        ensure_can_touch(actor, "update", existing.author_id)?;

        let now = self.clock.now();
        let published_at = if command.publish { Some(now) } else { None };

        let mut update =
            ArticleUpdate::new(id, existing.updated_at).with_publish_state(command.publish, published_at);
        update.set_updated_at(now);

        let updated = self.write_repo.update(update).await?;
        Ok(updated.into())
    }
}
