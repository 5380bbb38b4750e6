use super::{
    common,
    service::{AuditQueryService, CachedAuditPage},
};
use crate::{
    application::{
        dto::{AuditLogDto, AuthenticatedUser, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::audit::{cursor::AuditLogCursor, filter::AuditDateFilter},
};
use chrono::{DateTime, NaiveDate, Utc};

pub struct ListAuditLogsQuery {
    /// Exact-day filter; wins over the range fields when both are given.
    pub date: Option<NaiveDate>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: u32,
    pub cursor: Option<String>,
    /// Bypass the staleness cache and refetch from storage.
    pub force: bool,
}

impl AuditQueryService {
    pub async fn list_audit_logs(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let limit = common::normalize_limit(query.limit);
        let filter = AuditDateFilter::resolve(query.date, query.start_date, query.end_date)
            .map_err(ApplicationError::from)?;
        let typed_cursor = self.decode_cursor(query.cursor.as_deref())?;

        let key = page_cache_key(&filter, query.cursor.as_deref(), limit);
        if query.force {
            self.cache.invalidate(&key);
        } else if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.into_page());
        }

        let (items, next_cursor) = self
            .repo
            .list_page(&filter, limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        let total = self
            .repo
            .count(&filter)
            .await
            .map_err(ApplicationError::from)?;

        let cached = CachedAuditPage {
            items: items.into_iter().map(Into::into).collect(),
            next_cursor: next_cursor.map(|cursor| cursor.encode()),
            total,
        };
        self.cache.insert(key, cached.clone());
        Ok(cached.into_page())
    }

    fn decode_cursor(&self, cursor: Option<&str>) -> ApplicationResult<Option<AuditLogCursor>> {
        cursor
            .map(|token| AuditLogCursor::decode(token).map_err(ApplicationError::from))
            .transpose()
    }
}

fn page_cache_key(filter: &AuditDateFilter, cursor: Option<&str>, limit: u32) -> String {
    format!("{}|{}|{limit}", filter.cache_key(), cursor.unwrap_or("-"))
}
