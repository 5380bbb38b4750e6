// src/application/commands/advertisements/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::{
        advertisement::AdvertisementRepository, article::ArticleReadRepository,
        audit::AuditLogRepository,
    },
};

/// Advertisement mutations audit themselves (with before/after change
/// snapshots) instead of relying on the generic HTTP audit middleware,
/// which skips the ads routes.
pub struct AdvertisementCommandService {
    pub(super) repo: Arc<dyn AdvertisementRepository>,
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) audit_repo: Arc<dyn AuditLogRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AdvertisementCommandService {
    pub fn new(
        repo: Arc<dyn AdvertisementRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        audit_repo: Arc<dyn AuditLogRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            article_repo,
            audit_repo,
            clock,
        }
    }
}
