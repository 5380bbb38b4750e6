// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::article::{ArticleReadRepository, ArticleSlug, ArticleTitle, ArticleWriteRepository},
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) slugger: Arc<dyn SlugGenerator>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            clock,
            slugger,
        }
    }

    /// Slug from the title, with a numeric suffix when taken.
    pub(super) async fn generate_unique_slug(
        &self,
        title: &ArticleTitle,
    ) -> ApplicationResult<ArticleSlug> {
        const MAX_ATTEMPTS: u32 = 50;

        let base = self.slugger.slugify(title.as_str());
        let candidate = ArticleSlug::new(base.as_str())?;
        if !self.read_repo.slug_exists(&candidate).await? {
            return Ok(candidate);
        }

        for n in 2..=MAX_ATTEMPTS {
            let candidate = ArticleSlug::new(format!("{base}-{n}"))?;
            if !self.read_repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(ApplicationError::conflict(
            "could not find a free slug for this title",
        ))
    }
}
