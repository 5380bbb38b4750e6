// src/presentation/http/middleware/audit.rs
use crate::domain::audit::{AuditAction, NewAuditLog};
use crate::presentation::http::extractors::MaybeAuthenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Extension, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Records write operations into the audit log, off the request path.
/// Advertisement routes are excluded: that command service audits its own
/// mutations with before/after change snapshots.
pub async fn audit_middleware(
    MaybeAuthenticated(user): MaybeAuthenticated,
    Extension(state): Extension<HttpState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let headers = req.headers().clone();

    let response = next.run(req).await;
    let status = response.status().as_u16();

    let action = if method == Method::POST {
        Some(AuditAction::Create)
    } else if method == Method::PUT || method == Method::PATCH {
        Some(AuditAction::Update)
    } else if method == Method::DELETE {
        Some(AuditAction::Delete)
    } else {
        None
    };

    let skip = path.starts_with("/api/v1/ads");
    if let Some(action) = action.filter(|_| !skip && response.status().is_success()) {
        let (target_model, target) = classify_target(&path);
        let actor_id = user.map(|u| u.id);
        let ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let note = format!("{method} {path} -> {status}");

        let repo = state.services.audit_log_repo();
        tokio::spawn(async move {
            let log = match NewAuditLog::new(action, target_model) {
                Ok(log) => log,
                Err(err) => {
                    warn!(error = %err, "unclassifiable audit target");
                    return;
                }
            };
            let mut log = log.with_note(note);
            if let Some(actor_id) = actor_id {
                log = log.with_actor(actor_id);
            }
            if let Some(target) = target {
                log = log.with_target(target);
            }
            if let Some(ip) = ip {
                log = log.with_ip(ip);
            }

            if let Err(err) = repo.insert(log).await {
                warn!(error = %err, "failed to insert audit log");
            }
        });
    }

    response
}

/// `/api/v1/articles/42/publish` → (`article`, `42`).
fn classify_target(path: &str) -> (String, Option<String>) {
    let mut segments = path
        .trim_start_matches('/')
        .split('/')
        .skip_while(|s| *s == "api" || *s == "v1");

    let model = match segments.next() {
        Some("articles") => "article".to_string(),
        Some("auth") | Some("users") => "user".to_string(),
        Some(other) if !other.is_empty() => other.trim_end_matches('s').to_string(),
        _ => "request".to_string(),
    };

    let target = segments
        .next()
        .filter(|s| s.parse::<i64>().is_ok())
        .map(|s| s.to_string());

    (model, target)
}
