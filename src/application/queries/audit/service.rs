use std::{sync::Arc, time::Duration};

use moka::sync::Cache;

use crate::application::dto::{AuditLogDto, CursorPage};
use crate::domain::audit::repository::AuditLogRepository;

/// One cached page, keyed by (filter, cursor, limit). Entries age out
/// after the configured TTL; a `force` refetch invalidates the key first.
#[derive(Clone)]
pub(super) struct CachedAuditPage {
    pub items: Vec<AuditLogDto>,
    pub next_cursor: Option<String>,
    pub total: u64,
}

impl CachedAuditPage {
    pub(super) fn into_page(self) -> CursorPage<AuditLogDto> {
        CursorPage::new(self.items, self.next_cursor).with_total(self.total)
    }
}

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) cache: Cache<String, CachedAuditPage>,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditLogRepository>, cache_ttl: Duration, cache_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(cache_capacity)
            .time_to_live(cache_ttl)
            .build();
        Self { repo, cache }
    }
}
