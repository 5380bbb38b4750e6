use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Date constraint on an audit listing, resolved from the raw request
/// fields `{date, start_date, end_date}`. An exact `date` takes precedence
/// over a range when a caller supplies both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditDateFilter {
    All,
    Day(NaiveDate),
    Range {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
}

impl AuditDateFilter {
    pub fn resolve(
        date: Option<NaiveDate>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if let Some(day) = date {
            return Ok(Self::Day(day));
        }
        match (start, end) {
            (None, None) => Ok(Self::All),
            (start, end) => {
                if let (Some(s), Some(e)) = (start, end) {
                    if s > e {
                        return Err(DomainError::Validation(
                            "start_date must not be after end_date".into(),
                        ));
                    }
                }
                Ok(Self::Range { start, end })
            }
        }
    }

    /// Whether a record timestamp satisfies this filter. `Day` covers the
    /// UTC calendar day; `Range` bounds are inclusive.
    pub fn matches(&self, created_at: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Day(day) => created_at.date_naive() == *day,
            Self::Range { start, end } => {
                start.is_none_or(|s| created_at >= s) && end.is_none_or(|e| created_at <= e)
            }
        }
    }

    /// The UTC instant a `Day` filter starts at. Query construction treats
    /// the day as `[start, start + 1 day)`.
    pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
        day.and_time(NaiveTime::MIN).and_utc()
    }

    /// Stable key for caching a page of results under this filter.
    pub fn cache_key(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Day(day) => format!("day:{day}"),
            Self::Range { start, end } => format!(
                "range:{}..{}",
                start.map(|s| s.to_rfc3339()).unwrap_or_default(),
                end.map(|e| e.to_rfc3339()).unwrap_or_default()
            ),
        }
    }
}
