use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::UserUpdate,
};

pub struct UpdateProfileCommand {
    pub display_name: Option<String>,
}

impl UserCommandService {
    /// Account-settings update for the caller's own profile.
    pub async fn update_profile(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateProfileCommand,
    ) -> ApplicationResult<UserDto> {
        let display_name = command
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let update = UserUpdate::new(actor.id).with_display_name(display_name);
        let updated = self
            .user_repo
            .update(update)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        Ok(updated.into())
    }
}
