use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleListCursor, ArticleReadRepository},
};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
}

impl ArticleQueryService {
    pub fn new(read_repo: Arc<dyn ArticleReadRepository>) -> Self {
        Self { read_repo }
    }

    pub(super) fn normalize_listing(
        &self,
        actor: Option<&AuthenticatedUser>,
        include_drafts: bool,
        limit: u32,
    ) -> ApplicationResult<(bool, u32)> {
        let include_drafts = if include_drafts {
            let actor = actor.ok_or_else(|| {
                ApplicationError::forbidden("authentication required for draft access")
            })?;
            if !actor.has_capability("articles", "view:drafts") {
                return Err(ApplicationError::forbidden(
                    "missing capability articles:view:drafts",
                ));
            }
            true
        } else {
            false
        };

        const DEFAULT_LIMIT: u32 = 20;
        const MAX_LIMIT: u32 = 100;

        let limit = if limit == 0 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        };

        Ok((include_drafts, limit))
    }

    pub(super) fn decode_cursor(
        &self,
        token: Option<&str>,
    ) -> ApplicationResult<Option<ArticleListCursor>> {
        token
            .map(|value| ArticleListCursor::decode(value).map_err(ApplicationError::from))
            .transpose()
    }
}
