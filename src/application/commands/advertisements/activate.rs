// src/application/commands/advertisements/activate.rs
use super::{AdvertisementCommandService, capability::ensure_can_manage};
use crate::{
    application::{
        dto::{AdvertisementDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        advertisement::{
            AdStatus, Advertisement, AdvertisementId, AdvertisementUpdate, DeletedVisibility,
            ServingWindow,
        },
        audit::{AuditAction, NewAuditLog},
    },
};
use chrono::{DateTime, Utc};
use serde_json::json;

pub struct ActivateAdvertisementCommand {
    pub id: i64,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl AdvertisementCommandService {
    /// Draft → Active. Expired ads stay expired; a new purchase is the
    /// only way to serve that placement again.
    pub async fn activate(
        &self,
        actor: &AuthenticatedUser,
        command: ActivateAdvertisementCommand,
    ) -> ApplicationResult<AdvertisementDto> {
        let id = AdvertisementId::new(command.id)?;
        let existing = self
            .repo
            .find_by_id(id, DeletedVisibility::ActiveOnly)
            .await?
            .ok_or_else(|| ApplicationError::not_found("advertisement not found"))?;

        ensure_can_manage(actor, existing.buyer_id)?;

        let now = self.clock.now();
        self.reject_if_expired(&existing, now).await?;

        let start_at = command.start_at.unwrap_or(now);
        if let Some(end) = command.end_at {
            if start_at >= end {
                return Err(ApplicationError::validation(
                    "start_at must be before end_at",
                ));
            }
        }

        let updated = self
            .repo
            .update(
                AdvertisementUpdate::new(id, now)
                    .with_status(AdStatus::Active)
                    .with_window(ServingWindow {
                        start_at: Some(start_at),
                        end_at: command.end_at,
                    }),
            )
            .await?
            .ok_or_else(|| ApplicationError::not_found("advertisement not found"))?;

        self.audit(
            NewAuditLog::new(AuditAction::Update, "advertisement")?
                .with_actor(actor.id)
                .with_target(i64::from(id).to_string())
                .with_changes(json!({
                    "before": { "status": existing.status.as_str() },
                    "after": { "status": updated.status.as_str() }
                }))
                .with_note("advertisement activated"),
        )
        .await;

        Ok(AdvertisementDto::from_entity(updated, now))
    }

    /// Expiry is time-driven, so it is settled here rather than by a
    /// background sweep: an Active ad whose window has closed is stamped
    /// Expired on the spot, and Expired is terminal.
    async fn reject_if_expired(
        &self,
        existing: &Advertisement,
        now: DateTime<Utc>,
    ) -> ApplicationResult<()> {
        let newly_expired = existing.status == AdStatus::Active
            && existing.expiry_date().is_some_and(|end| end <= now);

        if newly_expired {
            self.repo
                .update(
                    AdvertisementUpdate::new(existing.id, now).with_status(AdStatus::Expired),
                )
                .await?;
        }

        if newly_expired || existing.status == AdStatus::Expired {
            return Err(ApplicationError::conflict(
                "expired advertisements cannot be reactivated",
            ));
        }
        Ok(())
    }
}
