use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Opaque position marker for audit pagination. Keyset over
/// `(created_at, id)` descending so concurrent inserts never shift pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl AuditLogCursor {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.created_at.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?;
        let raw = String::from_utf8(bytes)
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?;
        let (created_at_s, id_s) = raw
            .split_once('|')
            .ok_or_else(|| DomainError::Validation("invalid cursor token".into()))?;
        let created_at = DateTime::parse_from_rfc3339(created_at_s)
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?
            .with_timezone(&Utc);
        let id = id_s
            .parse::<i64>()
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?;
        Ok(Self::new(created_at, id))
    }
}

#[cfg(test)]
mod tests {
    use super::AuditLogCursor;
    use chrono::Utc;

    #[test]
    fn cursor_encode_decode_roundtrip() {
        let now = Utc::now();
        let cursor = AuditLogCursor::new(now, 42);
        let decoded = AuditLogCursor::decode(&cursor.encode()).expect("decode should succeed");
        assert_eq!(decoded.id, 42);
        assert_eq!(decoded.created_at.timestamp(), now.timestamp());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(AuditLogCursor::decode("not base64 !!").is_err());
        assert!(AuditLogCursor::decode("bm8gcGlwZQ").is_err());
    }
}
