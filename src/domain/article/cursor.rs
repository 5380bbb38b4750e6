use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset cursor over `(created_at, id)` descending.
#[derive(Debug, Clone)]
pub struct ArticleListCursor {
    pub created_at: DateTime<Utc>,
    pub article_id: ArticleId,
}

impl ArticleListCursor {
    pub fn from_parts(created_at: DateTime<Utc>, article_id: ArticleId) -> Self {
        Self {
            created_at,
            article_id,
        }
    }

    pub fn encode(&self) -> String {
        let raw = format!(
            "{}|{}",
            self.created_at.to_rfc3339(),
            i64::from(self.article_id)
        );
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
        Ok(Self::from_parts(created_at, ArticleId::new(id)?))
    }
}
