use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::UserId;

pub(super) fn ensure_capability(
    actor: &AuthenticatedUser,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}

/// `<action>:any` wins outright; `<action>:own` only for the author.
pub(super) fn ensure_can_touch(
    actor: &AuthenticatedUser,
    action: &str,
    author_id: UserId,
) -> ApplicationResult<()> {
    if actor.has_capability("articles", &format!("{action}:any")) {
        return Ok(());
    }
    if actor.has_capability("articles", &format!("{action}:own")) && actor.id == author_id {
        return Ok(());
    }
    Err(ApplicationError::forbidden(format!(
        "missing capability articles:{action}"
    )))
}
