// src/application/commands/advertisements/cancel.rs
use super::{AdvertisementCommandService, capability::ensure_can_manage};
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

pub struct CancelAdvertisementCommand {
    pub id: i64,
}

impl AdvertisementCommandService {
    /// Soft-deletes the ad. Unknown ids yield `None` rather than an error,
    /// and cancelling twice is a no-op success.
    pub async fn cancel(
        &self,
        actor: &AuthenticatedUser,
        command: CancelAdvertisementCommand,
    ) -> ApplicationResult<Option<AdvertisementDto>> {
        let id = AdvertisementId::new(command.id)?;
        let Some(existing) = self
            .repo
            .find_by_id(id, DeletedVisibility::IncludeDeleted)
            .await?
        else {
            return Ok(None);
        };

        ensure_can_manage(actor, existing.buyer_id)?;

        let now = self.clock.now();
        let was_deleted = existing.is_deleted;
        let Some(cancelled) = self.repo.soft_delete(id, actor.id, now).await? else {
            return Ok(None);
        };

        // Re-cancelling changes nothing, so there is nothing to audit.
        if !was_deleted {
            self.audit(
                NewAuditLog::new(AuditAction::Delete, "advertisement")?
                    .with_actor(actor.id)
                    .with_target(i64::from(id).to_string())
                    .with_changes(json!({
                        "before": { "is_deleted": false },
                        "after": { "is_deleted": true }
                    }))
                    .with_note("advertisement cancelled"),
            )
            .await;
        }

        Ok(Some(AdvertisementDto::from_entity(cancelled, now)))
    }
}
