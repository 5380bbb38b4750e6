// src/application/commands/advertisements/engagement.rs
use super::AdvertisementCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::advertisement::{AdvertisementId, DeletedVisibility, EngagementKind},
};

pub struct RecordEngagementCommand {
    pub id: i64,
    pub kind: EngagementKind,
}

impl AdvertisementCommandService {
    /// Serving counters. Unauthenticated by design: the public site fires
    /// these for rendered placements. Cancelled ads are invisible here.
    pub async fn record_engagement(
        &self,
        command: RecordEngagementCommand,
    ) -> ApplicationResult<()> {
        let id = AdvertisementId::new(command.id)?;
        self.repo
            .find_by_id(id, DeletedVisibility::ActiveOnly)
            .await?
            .ok_or_else(|| ApplicationError::not_found("advertisement not found"))?;

        match command.kind {
            EngagementKind::Impression => self.repo.record_impression(id).await?,
            EngagementKind::Click => self.repo.record_click(id).await?,
        }
        Ok(())
    }
}
