use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvertisementId(pub i64);

impl AdvertisementId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "advertisement id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<AdvertisementId> for i64 {
    fn from(value: AdvertisementId) -> Self {
        value.0
    }
}

/// Stored status of an advertisement. Cancellation is not a status; it is
/// the soft-delete triple on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Draft,
    Active,
    Expired,
}

impl AdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdStatus::Draft => "draft",
            AdStatus::Active => "active",
            AdStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for AdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AdStatus::Draft),
            "active" => Ok(AdStatus::Active),
            "expired" => Ok(AdStatus::Expired),
            other => Err(DomainError::Validation(format!(
                "unknown advertisement status '{other}'"
            ))),
        }
    }
}

/// Whether a read should see soft-deleted records. Every read path on the
/// advertisement store takes one of these; `ActiveOnly` is the default at
/// all call sites unless the caller holds the view:deleted capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletedVisibility {
    ActiveOnly,
    IncludeDeleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Impression,
    Click,
}

/// Plan terms frozen at purchase time. Later edits to the plan catalog
/// must not retroactively change a sold placement, so the ad carries its
/// own copy instead of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub plan_name: String,
    pub placements: Vec<String>,
    pub price: Decimal,
    pub currency: String,
    pub duration_days: i64,
}

impl PlanSnapshot {
    pub fn new(
        plan_name: impl Into<String>,
        placements: Vec<String>,
        price: Decimal,
        currency: impl Into<String>,
        duration_days: i64,
    ) -> DomainResult<Self> {
        let plan_name = plan_name.into();
        let currency = currency.into();
        if plan_name.trim().is_empty() {
            return Err(DomainError::Validation("plan name cannot be empty".into()));
        }
        if placements.is_empty() || placements.iter().any(|p| p.trim().is_empty()) {
            return Err(DomainError::Validation(
                "a plan needs at least one non-empty placement".into(),
            ));
        }
        if price.is_sign_negative() {
            return Err(DomainError::Validation("price cannot be negative".into()));
        }
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::Validation(
                "currency must be a 3-letter ISO code".into(),
            ));
        }
        if duration_days <= 0 {
            return Err(DomainError::Validation(
                "plan duration must be at least one day".into(),
            ));
        }
        Ok(Self {
            plan_name,
            placements,
            price,
            currency,
            duration_days,
        })
    }
}
