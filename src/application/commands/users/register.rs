use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{NewUser, PasswordHash, Role, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl UserCommandService {
    /// The first account on a fresh install becomes the admin; everyone
    /// after that starts as an editor.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let role = if self.user_repo.count().await? == 0 {
            Role::Admin
        } else {
            Role::Editor
        };

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let mut new_user = NewUser::new(username, password_hash, role, self.clock.now());
        new_user.display_name = command
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let created = self.user_repo.insert(new_user).await?;
        Ok(created.into())
    }
}
