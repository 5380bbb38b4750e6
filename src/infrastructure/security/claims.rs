// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId};
use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn parse_claims(
    facts: Vec<biscuit_auth::builder::Fact>,
) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);
    ctx.into_authenticated_user()
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    capabilities: std::collections::HashSet<Capability>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<biscuit_auth::builder::Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(fact.predicate);
        }
        ctx
    }

    fn into_authenticated_user(self) -> ApplicationResult<AuthenticatedUser> {
        let user_id = self
            .user_id
            .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
        let username = self
            .username
            .ok_or_else(|| ApplicationError::unauthorized("missing username"))?;
        let role = self
            .role
            .ok_or_else(|| ApplicationError::unauthorized("missing role"))?;
        let issued_at = self
            .issued_at
            .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
        let expires_at = self
            .expires_at
            .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

        let id = UserId::new(user_id).map_err(ApplicationError::from)?;

        let mut capabilities = role.default_capabilities();
        capabilities.extend(self.capabilities);

        Ok(AuthenticatedUser {
            id,
            username,
            role,
            capabilities,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
        })
    }

    fn apply_predicate(&mut self, predicate: biscuit_auth::builder::Predicate) {
        match predicate.name.as_str() {
            "user" => self.handle_user(&predicate),
            "role" => self.handle_role(&predicate),
            "issued_at" => self.issued_at = date_term(&predicate),
            "expires_at" => self.expires_at = date_term(&predicate),
            "right" => self.handle_right(&predicate),
            _ => {}
        }
    }

    fn handle_user(&mut self, predicate: &biscuit_auth::builder::Predicate) {
        if predicate.terms.len() == 2 {
            if let biscuit_auth::builder::Term::Integer(id) = predicate.terms[0] {
                self.user_id = Some(id);
            }
            if let biscuit_auth::builder::Term::Str(name) = predicate.terms[1].clone() {
                self.username = Some(name);
            }
        }
    }

    fn handle_role(&mut self, predicate: &biscuit_auth::builder::Predicate) {
        if let Some(biscuit_auth::builder::Term::Str(role_name)) = predicate.terms.first() {
            if let Ok(parsed) = role_name.parse() {
                self.role = Some(parsed);
            }
        }
    }

    fn handle_right(&mut self, predicate: &biscuit_auth::builder::Predicate) {
        if predicate.terms.len() == 2 {
            if let (
                biscuit_auth::builder::Term::Str(resource),
                biscuit_auth::builder::Term::Str(action),
            ) = (predicate.terms[0].clone(), predicate.terms[1].clone())
            {
                self.capabilities.insert(Capability::new(resource, action));
            }
        }
    }
}

fn date_term(predicate: &biscuit_auth::builder::Predicate) -> Option<SystemTime> {
    if let Some(biscuit_auth::builder::Term::Date(seconds)) = predicate.terms.first() {
        Some(UNIX_EPOCH + std::time::Duration::from_secs(*seconds))
    } else {
        None
    }
}
