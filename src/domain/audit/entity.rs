// src/domain/audit/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

/// What an audited request did. The set is closed; unknown actions from
/// storage are rejected rather than mapped to a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Read,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Read => "read",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "delete" => Ok(AuditAction::Delete),
            "read" => Ok(AuditAction::Read),
            other => Err(DomainError::Validation(format!(
                "unknown audit action '{other}'"
            ))),
        }
    }
}

/// An immutable audit record. Written once, never updated or deleted.
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub id: i64,
    pub actor_id: Option<UserId>,
    pub action: AuditAction,
    pub target: Option<String>,
    pub target_model: String,
    pub changes: Option<serde_json::Value>,
    pub ip: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub actor_id: Option<UserId>,
    pub action: AuditAction,
    pub target: Option<String>,
    pub target_model: String,
    pub changes: Option<serde_json::Value>,
    pub ip: Option<String>,
    pub note: Option<String>,
}

impl NewAuditLog {
    pub fn new(action: AuditAction, target_model: impl Into<String>) -> DomainResult<Self> {
        let target_model = target_model.into();
        if target_model.trim().is_empty() {
            return Err(DomainError::Validation(
                "audit target model cannot be empty".into(),
            ));
        }
        Ok(Self {
            actor_id: None,
            action,
            target: None,
            target_model,
            changes: None,
            ip: None,
            note: None,
        })
    }

    pub fn with_actor(mut self, actor_id: UserId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_changes(mut self, changes: serde_json::Value) -> Self {
        self.changes = Some(changes);
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
