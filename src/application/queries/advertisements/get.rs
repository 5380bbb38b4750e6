use super::{common, service::AdvertisementQueryService};
use crate::{
    application::{
        dto::{AdvertisementDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::advertisement::AdvertisementId,
};

pub struct GetAdvertisementQuery {
    pub id: i64,
    pub include_deleted: bool,
}

impl AdvertisementQueryService {
    pub async fn get_advertisement(
        &self,
        actor: &AuthenticatedUser,
        query: GetAdvertisementQuery,
    ) -> ApplicationResult<AdvertisementDto> {
        let visibility = common::resolve_visibility(actor, query.include_deleted)?;
        let id = AdvertisementId::new(query.id).map_err(ApplicationError::from)?;

        let ad = self
            .repo
            .find_by_id(id, visibility)
            .await
            .map_err(ApplicationError::from)?
            .ok_or_else(|| ApplicationError::not_found("advertisement not found"))?;

        Ok(AdvertisementDto::from_entity(ad, self.clock.now()))
    }
}
