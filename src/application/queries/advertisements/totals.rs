use super::{common, service::AdvertisementQueryService};
use crate::application::{
    dto::{AuthenticatedUser, StatusTotalDto},
    error::{ApplicationError, ApplicationResult},
};

pub struct StatusTotalsQuery {
    pub include_deleted: bool,
}

impl AdvertisementQueryService {
    pub async fn status_totals(
        &self,
        actor: &AuthenticatedUser,
        query: StatusTotalsQuery,
    ) -> ApplicationResult<Vec<StatusTotalDto>> {
        let visibility = common::resolve_visibility(actor, query.include_deleted)?;

        let totals = self
            .repo
            .status_totals(visibility)
            .await
            .map_err(ApplicationError::from)?;
        Ok(totals.into_iter().map(Into::into).collect())
    }
}
