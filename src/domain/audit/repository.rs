use crate::domain::audit::cursor::AuditLogCursor;
use crate::domain::audit::entity::{AuditLog, NewAuditLog};
use crate::domain::audit::filter::AuditDateFilter;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()>;

    /// Newest-first page. Returns the page plus the cursor for the next
    /// one, or `None` when the listing is exhausted.
    async fn list_page(
        &self,
        filter: &AuditDateFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)>;

    async fn count(&self, filter: &AuditDateFilter) -> DomainResult<u64>;
}
