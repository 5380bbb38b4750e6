use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::advertisement::DeletedVisibility;

/// Soft-deleted records stay hidden unless the caller explicitly asks for
/// them and holds the capability to see them.
pub(super) fn resolve_visibility(
    actor: &AuthenticatedUser,
    include_deleted: bool,
) -> ApplicationResult<DeletedVisibility> {
    if !include_deleted {
        return Ok(DeletedVisibility::ActiveOnly);
    }
    if actor.has_capability("ads", "view:deleted") {
        Ok(DeletedVisibility::IncludeDeleted)
    } else {
        Err(ApplicationError::forbidden(
            "missing capability ads:view:deleted",
        ))
    }
}

pub(super) fn normalize_limit(limit: u32) -> u32 {
    const DEFAULT_LIMIT: u32 = 20;
    const MAX_LIMIT: u32 = 100;

    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}
