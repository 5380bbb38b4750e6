// src/application/services/mod.rs
use std::{sync::Arc, time::Duration};

use crate::{
    application::{
        commands::{
            advertisements::AdvertisementCommandService, articles::ArticleCommandService,
            users::UserCommandService,
        },
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{
            advertisements::AdvertisementQueryService, articles::ArticleQueryService,
            audit::AuditQueryService, users::UserQueryService,
        },
    },
    domain::{
        advertisement::AdvertisementRepository,
        article::{ArticleReadRepository, ArticleWriteRepository},
        audit::AuditLogRepository,
        user::UserRepository,
    },
};

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub ad_commands: Arc<AdvertisementCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub ad_queries: Arc<AdvertisementQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    pub user_queries: Arc<UserQueryService>,
    token_manager: Arc<dyn TokenManager>,
    audit_log_repo: Arc<dyn AuditLogRepository>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        ad_repo: Arc<dyn AdvertisementRepository>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        audit_cache_ttl: Duration,
        audit_cache_capacity: u64,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&clock),
            Arc::clone(&slugger),
        ));

        let ad_commands = Arc::new(AdvertisementCommandService::new(
            Arc::clone(&ad_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&audit_log_repo),
            Arc::clone(&clock),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&article_read_repo)));
        let ad_queries = Arc::new(AdvertisementQueryService::new(
            Arc::clone(&ad_repo),
            Arc::clone(&clock),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(
            Arc::clone(&audit_log_repo),
            audit_cache_ttl,
            audit_cache_capacity,
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&user_repo)));

        Self {
            user_commands,
            article_commands,
            ad_commands,
            article_queries,
            ad_queries,
            audit_queries,
            user_queries,
            token_manager,
            audit_log_repo,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub fn audit_log_repo(&self) -> Arc<dyn AuditLogRepository> {
        Arc::clone(&self.audit_log_repo)
    }
}
