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

/// `manage:any` covers everything; `manage:own` only the buyer's own ads.
pub(super) fn ensure_can_manage(
    actor: &AuthenticatedUser,
    buyer_id: UserId,
) -> ApplicationResult<()> {
    if actor.has_capability("ads", "manage:any") {
        return Ok(());
    }
    if actor.has_capability("ads", "manage:own") && actor.id == buyer_id {
        return Ok(());
    }
    Err(ApplicationError::forbidden("missing capability ads:manage"))
}
