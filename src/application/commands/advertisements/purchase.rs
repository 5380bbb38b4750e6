// src/application/commands/advertisements/purchase.rs
use super::{AdvertisementCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{AdvertisementDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        advertisement::{AdStatus, NewAdvertisement, PlanSnapshot},
        article::ArticleId,
        audit::{AuditAction, NewAuditLog},
    },
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::warn;

pub struct PurchaseAdvertisementCommand {
    pub article_id: i64,
    pub plan_name: String,
    pub placements: Vec<String>,
    pub price: Decimal,
    pub currency: String,
    pub duration_days: i64,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl AdvertisementCommandService {
    /// Creates a draft ad with the plan terms frozen into the snapshot.
    /// The snapshot is the only copy of those terms the ad will ever see.
    pub async fn purchase(
        &self,
        actor: &AuthenticatedUser,
        command: PurchaseAdvertisementCommand,
    ) -> ApplicationResult<AdvertisementDto> {
        ensure_capability(actor, "ads", "purchase")?;

        let article_id = ArticleId::new(command.article_id)?;
        self.article_repo
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let snapshot = PlanSnapshot::new(
            command.plan_name,
            command.placements,
            command.price,
            command.currency,
            command.duration_days,
        )?;

        if let (Some(start), Some(end)) = (command.start_at, command.end_at) {
            if start >= end {
                return Err(ApplicationError::validation(
                    "start_at must be before end_at",
                ));
            }
        }

        let now = self.clock.now();
        let created = self
            .repo
            .insert(NewAdvertisement {
                article_id,
                buyer_id: actor.id,
                snapshot,
                status: AdStatus::Draft,
                start_at: command.start_at,
                end_at: command.end_at,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.audit(
            NewAuditLog::new(AuditAction::Create, "advertisement")?
                .with_actor(actor.id)
                .with_target(i64::from(created.id).to_string())
                .with_changes(json!({
                    "after": { "status": created.status.as_str(), "plan": created.snapshot.plan_name }
                }))
                .with_note("advertisement purchased"),
        )
        .await;

        Ok(AdvertisementDto::from_entity(created, now))
    }

    /// Audit insertion is best-effort; a failed write is logged and the
    /// command still succeeds.
    pub(super) async fn audit(&self, log: NewAuditLog) {
        if let Err(err) = self.audit_repo.insert(log).await {
            warn!(error = %err, "failed to insert audit log");
        }
    }
}
