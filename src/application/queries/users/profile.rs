use super::UserQueryService;
use crate::application::{
    dto::{AuthenticatedUser, CapabilityView, UserProfileDto},
    error::{ApplicationError, ApplicationResult},
};

pub struct GetProfileQuery;

impl UserQueryService {
    pub async fn get_profile(
        &self,
        actor: &AuthenticatedUser,
        _query: GetProfileQuery,
    ) -> ApplicationResult<UserProfileDto> {
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        let mut capabilities: Vec<CapabilityView> = actor
            .capabilities
            .iter()
            .cloned()
            .map(Into::into)
            .collect();
        capabilities.sort_by(|a, b| {
            (a.resource.as_str(), a.action.as_str()).cmp(&(b.resource.as_str(), b.action.as_str()))
        });

        Ok(UserProfileDto {
            user: user.into(),
            capabilities,
        })
    }
}
