// src/application/commands/advertisements/restore.rs
use super::{AdvertisementCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{AdvertisementDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        advertisement::{AdvertisementId, DeletedVisibility},
        audit::{AuditAction, NewAuditLog},
    },
};
use serde_json::json;

pub struct RestoreAdvertisementCommand {
    pub id: i64,
}

impl AdvertisementCommandService {
    /// Clears the soft-delete triple. Restoring does not rewind time: an
    /// ad whose window has passed comes back expired, not serving.
    pub async fn restore(
        &self,
        actor: &AuthenticatedUser,
        command: RestoreAdvertisementCommand,
    ) -> ApplicationResult<Option<AdvertisementDto>> {
        ensure_capability(actor, "ads", "restore")?;

        let id = AdvertisementId::new(command.id)?;
        let Some(existing) = self
            .repo
            .find_by_id(id, DeletedVisibility::IncludeDeleted)
            .await?
        else {
            return Ok(None);
        };

        let now = self.clock.now();
        let was_deleted = existing.is_deleted;
        let Some(restored) = self.repo.restore(id, now).await? else {
            return Ok(None);
        };

        if was_deleted {
            self.audit(
                NewAuditLog::new(AuditAction::Update, "advertisement")?
                    .with_actor(actor.id)
                    .with_target(i64::from(id).to_string())
                    .with_changes(json!({
                        "before": { "is_deleted": true },
                        "after": { "is_deleted": false }
                    }))
                    .with_note("advertisement restored"),
            )
            .await;
        }

        Ok(Some(AdvertisementDto::from_entity(restored, now)))
    }
}
