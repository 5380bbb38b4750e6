// src/infrastructure/repositories/postgres_audit_log.rs
use super::map_sqlx;
use crate::domain::audit::{
    cursor::AuditLogCursor,
    entity::{AuditAction, AuditLog, NewAuditLog},
    filter::AuditDateFilter,
    repository::AuditLogRepository,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const AUDIT_COLUMNS: &str =
    "id, actor_id, action, target, target_model, changes, ip, note, created_at";

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    actor_id: Option<i64>,
    action: String,
    target: Option<String>,
    target_model: String,
    changes: Option<serde_json::Value>,
    ip: Option<String>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(AuditLog {
            id: row.id,
            actor_id: row.actor_id.map(UserId::new).transpose()?,
            action: row.action.parse::<AuditAction>()?,
            target: row.target,
            target_model: row.target_model,
            changes: row.changes,
            ip: row.ip,
            note: row.note,
            created_at: row.created_at,
        })
    }
}

fn push_date_filter(
    builder: &mut QueryBuilder<'_, Postgres>,
    filter: &AuditDateFilter,
    has_where: &mut bool,
) {
    let mut push_clause = |builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool| {
        if *has_where {
            builder.push(" AND ");
        } else {
            builder.push(" WHERE ");
            *has_where = true;
        }
    };

    match filter {
        AuditDateFilter::All => {}
        AuditDateFilter::Day(day) => {
            let start = AuditDateFilter::day_start(*day);
            push_clause(builder, has_where);
            builder.push("created_at >= ");
            builder.push_bind(start);
            builder.push(" AND created_at < ");
            builder.push_bind(start + Duration::days(1));
        }
        AuditDateFilter::Range { start, end } => {
            if let Some(start) = start {
                push_clause(builder, has_where);
                builder.push("created_at >= ");
                builder.push_bind(*start);
            }
            if let Some(end) = end {
                push_clause(builder, has_where);
                builder.push("created_at <= ");
                builder.push_bind(*end);
            }
        }
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO audit_logs (actor_id, action, target, target_model, changes, ip, note)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(log.actor_id.map(i64::from))
        .bind(log.action.as_str())
        .bind(log.target)
        .bind(log.target_model)
        .bind(log.changes)
        .bind(log.ip)
        .bind(log.note)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list_page(
        &self,
        filter: &AuditDateFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = (limit as i64) + 1;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {AUDIT_COLUMNS} FROM audit_logs"));
        let mut has_where = false;
        push_date_filter(&mut builder, filter, &mut has_where);

        if let Some(cursor) = cursor.as_ref() {
            if has_where {
                builder.push(" AND ");
            } else {
                builder.push(" WHERE ");
            }
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut logs = rows
            .into_iter()
            .map(AuditLog::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_cursor = None;
        if logs.len() > limit as usize {
            logs.pop();
            if let Some(last) = logs.last() {
                next_cursor = Some(AuditLogCursor::new(last.created_at, last.id));
            }
        }

        Ok((logs, next_cursor))
    }

    async fn count(&self, filter: &AuditDateFilter) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM audit_logs");
        let mut has_where = false;
        push_date_filter(&mut builder, filter, &mut has_where);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(count as u64)
    }
}
