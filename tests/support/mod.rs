//! In-memory doubles for the repository and port traits, shared by the
//! integration tests. Not every binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};
use wayfarer_core::application::dto::{AuthTokenDto, AuthenticatedUser, TokenSubject};
use wayfarer_core::application::error::{ApplicationError, ApplicationResult};
use wayfarer_core::application::ports::{
    security::{PasswordHasher, TokenManager},
    time::Clock,
};
use wayfarer_core::domain::advertisement::{
    AdStatus, Advertisement, AdvertisementCursor, AdvertisementId, AdvertisementListFilter,
    AdvertisementRepository, AdvertisementUpdate, DeletedVisibility, NewAdvertisement, StatusTotal,
};
use wayfarer_core::domain::article::{
    Article, ArticleBody, ArticleId, ArticleListCursor, ArticleReadRepository, ArticleSlug,
    ArticleTitle, ArticleUpdate, ArticleWriteRepository, NewArticle, SeoMetadata,
};
use wayfarer_core::domain::audit::{
    AuditAction, AuditDateFilter, AuditLog, AuditLogCursor, AuditLogRepository, NewAuditLog,
};
use wayfarer_core::domain::errors::{DomainError, DomainResult};
use wayfarer_core::domain::user::{
    NewUser, Role, User, UserId, UserRepository, UserUpdate, Username,
};

pub fn actor_with_role(id: i64, role: Role) -> AuthenticatedUser {
    let now = Utc::now();
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: format!("user-{id}"),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + chrono::Duration::hours(1),
    }
}

pub fn admin_actor(id: i64) -> AuthenticatedUser {
    actor_with_role(id, Role::Admin)
}

pub fn editor_actor(id: i64) -> AuthenticatedUser {
    actor_with_role(id, Role::Editor)
}

pub fn audit_log(id: i64, created_at: DateTime<Utc>) -> AuditLog {
    AuditLog {
        id,
        actor_id: None,
        action: AuditAction::Update,
        target: Some(id.to_string()),
        target_model: "article".into(),
        changes: None,
        ip: None,
        note: None,
        created_at,
    }
}

// --- clock ---------------------------------------------------------------

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// --- audit ---------------------------------------------------------------

/// Behaves like the Postgres audit store: newest-first keyset pages over
/// whatever is seeded into `logs`.
#[derive(Default)]
pub struct MockAuditRepo {
    pub logs: Mutex<Vec<AuditLog>>,
    pub fail_reads: AtomicBool,
    pub list_calls: AtomicUsize,
}

impl MockAuditRepo {
    pub fn seeded(logs: Vec<AuditLog>) -> Self {
        Self {
            logs: Mutex::new(logs),
            ..Self::default()
        }
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn sorted_matching(&self, filter: &AuditDateFilter) -> Vec<AuditLog> {
        let mut logs: Vec<_> = self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|log| filter.matches(log.created_at))
            .cloned()
            .collect();
        logs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        logs
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditRepo {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()> {
        let mut logs = self.logs.lock().unwrap();
        let id = logs.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        logs.push(AuditLog {
            id,
            actor_id: log.actor_id,
            action: log.action,
            target: log.target,
            target_model: log.target_model,
            changes: log.changes,
            ip: log.ip,
            note: log.note,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &AuditDateFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("storage unavailable".into()));
        }

        let mut logs = self.sorted_matching(filter);
        if let Some(cursor) = cursor {
            logs.retain(|log| (log.created_at, log.id) < (cursor.created_at, cursor.id));
        }

        let limit = limit as usize;
        let has_more = logs.len() > limit;
        logs.truncate(limit);
        let next_cursor = if has_more {
            logs.last()
                .map(|last| AuditLogCursor::new(last.created_at, last.id))
        } else {
            None
        };

        Ok((logs, next_cursor))
    }

    async fn count(&self, filter: &AuditDateFilter) -> DomainResult<u64> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("storage unavailable".into()));
        }
        Ok(self.sorted_matching(filter).len() as u64)
    }
}

// --- advertisements ------------------------------------------------------

/// In-memory stand-in for the soft-delete scoped store. `ActiveOnly`
/// reads hide tombstoned rows exactly like the SQL predicate does.
#[derive(Default)]
pub struct MockAdRepo {
    pub ads: Mutex<HashMap<i64, Advertisement>>,
    next_id: AtomicUsize,
}

impl MockAdRepo {
    fn visible(ad: &Advertisement, visibility: DeletedVisibility) -> bool {
        visibility == DeletedVisibility::IncludeDeleted || !ad.is_deleted
    }

    fn matches(ad: &Advertisement, filter: &AdvertisementListFilter) -> bool {
        filter.article_id.is_none_or(|id| ad.article_id == id)
            && filter.status.is_none_or(|status| ad.status == status)
    }
}

#[async_trait]
impl AdvertisementRepository for MockAdRepo {
    async fn insert(&self, ad: NewAdvertisement) -> DomainResult<Advertisement> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let stored = Advertisement {
            id: AdvertisementId::new(id)?,
            article_id: ad.article_id,
            buyer_id: ad.buyer_id,
            snapshot: ad.snapshot,
            status: ad.status,
            start_at: ad.start_at,
            end_at: ad.end_at,
            impressions: 0,
            clicks: 0,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
            created_at: ad.created_at,
            updated_at: ad.updated_at,
        };
        self.ads.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: AdvertisementId,
        visibility: DeletedVisibility,
    ) -> DomainResult<Option<Advertisement>> {
        Ok(self
            .ads
            .lock()
            .unwrap()
            .get(&i64::from(id))
            .filter(|ad| Self::visible(ad, visibility))
            .cloned())
    }

    async fn list_page(
        &self,
        filter: AdvertisementListFilter,
        visibility: DeletedVisibility,
        limit: u32,
        cursor: Option<AdvertisementCursor>,
    ) -> DomainResult<(Vec<Advertisement>, Option<AdvertisementCursor>)> {
        let mut ads: Vec<_> = self
            .ads
            .lock()
            .unwrap()
            .values()
            .filter(|ad| Self::visible(ad, visibility) && Self::matches(ad, &filter))
            .cloned()
            .collect();
        ads.sort_by(|a, b| {
            (b.created_at, i64::from(b.id)).cmp(&(a.created_at, i64::from(a.id)))
        });
        if let Some(cursor) = cursor {
            ads.retain(|ad| {
                (ad.created_at, i64::from(ad.id)) < (cursor.created_at, i64::from(cursor.ad_id))
            });
        }

        let limit = limit as usize;
        let has_more = ads.len() > limit;
        ads.truncate(limit);
        let next_cursor = if has_more {
            ads.last()
                .map(|last| AdvertisementCursor::from_parts(last.created_at, last.id))
        } else {
            None
        };

        Ok((ads, next_cursor))
    }

    async fn count(
        &self,
        filter: AdvertisementListFilter,
        visibility: DeletedVisibility,
    ) -> DomainResult<u64> {
        Ok(self
            .ads
            .lock()
            .unwrap()
            .values()
            .filter(|ad| Self::visible(ad, visibility) && Self::matches(ad, &filter))
            .count() as u64)
    }

    async fn status_totals(&self, visibility: DeletedVisibility) -> DomainResult<Vec<StatusTotal>> {
        let mut by_status: HashMap<AdStatus, u64> = HashMap::new();
        for ad in self.ads.lock().unwrap().values() {
            if Self::visible(ad, visibility) {
                *by_status.entry(ad.status).or_default() += 1;
            }
        }
        let mut totals: Vec<_> = by_status
            .into_iter()
            .map(|(status, count)| StatusTotal { status, count })
            .collect();
        totals.sort_by_key(|t| t.status.as_str());
        Ok(totals)
    }

    async fn update(&self, update: AdvertisementUpdate) -> DomainResult<Option<Advertisement>> {
        let mut ads = self.ads.lock().unwrap();
        let Some(ad) = ads.get_mut(&i64::from(update.id)) else {
            return Ok(None);
        };
        if let Some(status) = update.status {
            ad.status = status;
        }
        if let Some(window) = update.window {
            ad.start_at = window.start_at;
            ad.end_at = window.end_at;
        }
        ad.updated_at = update.updated_at;
        Ok(Some(ad.clone()))
    }

    async fn soft_delete(
        &self,
        id: AdvertisementId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Advertisement>> {
        let mut ads = self.ads.lock().unwrap();
        let Some(ad) = ads.get_mut(&i64::from(id)) else {
            return Ok(None);
        };
        if !ad.is_deleted {
            ad.is_deleted = true;
            ad.deleted_at = Some(now);
            ad.deleted_by = Some(actor);
            ad.updated_at = now;
        }
        Ok(Some(ad.clone()))
    }

    async fn restore(
        &self,
        id: AdvertisementId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Advertisement>> {
        let mut ads = self.ads.lock().unwrap();
        let Some(ad) = ads.get_mut(&i64::from(id)) else {
            return Ok(None);
        };
        if ad.is_deleted {
            ad.is_deleted = false;
            ad.deleted_at = None;
            ad.deleted_by = None;
            ad.updated_at = now;
        }
        Ok(Some(ad.clone()))
    }

    async fn record_impression(&self, id: AdvertisementId) -> DomainResult<()> {
        if let Some(ad) = self.ads.lock().unwrap().get_mut(&i64::from(id)) {
            ad.impressions += 1;
        }
        Ok(())
    }

    async fn record_click(&self, id: AdvertisementId) -> DomainResult<()> {
        if let Some(ad) = self.ads.lock().unwrap().get_mut(&i64::from(id)) {
            ad.clicks += 1;
        }
        Ok(())
    }
}

// --- articles ------------------------------------------------------------

pub fn sample_article(id: i64, author_id: i64) -> Article {
    let now = Utc::now();
    Article {
        id: ArticleId::new(id).unwrap(),
        title: ArticleTitle::new(format!("Guide {id}")).unwrap(),
        slug: ArticleSlug::new(format!("guide-{id}")).unwrap(),
        summary: None,
        body: ArticleBody::new("A long weekend, well spent.").unwrap(),
        destinations: vec![],
        faqs: vec![],
        seo: SeoMetadata::default(),
        published: true,
        published_at: Some(now),
        author_id: UserId::new(author_id).unwrap(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MockArticleRepo {
    pub articles: Mutex<HashMap<i64, Article>>,
    next_id: AtomicUsize,
}

impl MockArticleRepo {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        let next = articles.iter().map(|a| i64::from(a.id)).max().unwrap_or(0);
        let repo = Self::default();
        repo.next_id.store(next as usize, Ordering::SeqCst);
        *repo.articles.lock().unwrap() = articles
            .into_iter()
            .map(|a| (i64::from(a.id), a))
            .collect();
        repo
    }
}

#[async_trait]
impl ArticleWriteRepository for MockArticleRepo {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let stored = Article {
            id: ArticleId::new(id)?,
            title: article.title,
            slug: article.slug,
            summary: article.summary,
            body: article.body,
            destinations: article.destinations,
            faqs: article.faqs,
            seo: article.seo,
            published: article.published,
            published_at: article.published_at,
            author_id: article.author_id,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        self.articles.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut articles = self.articles.lock().unwrap();
        let article = articles
            .get_mut(&i64::from(update.id))
            .filter(|a| a.updated_at == update.original_updated_at)
            .ok_or_else(|| DomainError::Conflict("article update conflict, please retry".into()))?;

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = update.slug {
            article.slug = slug;
        }
        if let Some(summary) = update.summary {
            article.summary = summary;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(destinations) = update.destinations {
            article.destinations = destinations;
        }
        if let Some(faqs) = update.faqs {
            article.faqs = faqs;
        }
        if let Some(seo) = update.seo {
            article.seo = seo;
        }
        if let Some(state) = update.publish_state {
            article.published = state.published;
            article.published_at = state.published_at;
        }
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        if self.articles.lock().unwrap().remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for MockArticleRepo {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.articles.lock().unwrap().get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .values()
            .find(|a| a.slug.as_str() == slug.as_str())
            .cloned())
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> DomainResult<bool> {
        Ok(self.find_by_slug(slug).await?.is_some())
    }

    async fn list_page(
        &self,
        include_drafts: bool,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)> {
        let mut articles: Vec<_> = self
            .articles
            .lock()
            .unwrap()
            .values()
            .filter(|a| include_drafts || a.published)
            .cloned()
            .collect();
        articles.sort_by(|a, b| {
            (b.created_at, i64::from(b.id)).cmp(&(a.created_at, i64::from(a.id)))
        });
        if let Some(cursor) = cursor {
            articles.retain(|a| {
                (a.created_at, i64::from(a.id))
                    < (cursor.created_at, i64::from(cursor.article_id))
            });
        }

        let limit = limit as usize;
        let has_more = articles.len() > limit;
        articles.truncate(limit);
        let next_cursor = if has_more {
            articles
                .last()
                .map(|last| ArticleListCursor::from_parts(last.created_at, last.id))
        } else {
            None
        };

        Ok((articles, next_cursor))
    }
}

// --- users ---------------------------------------------------------------

#[derive(Default)]
pub struct MockUserRepo {
    pub users: Mutex<HashMap<i64, User>>,
    next_id: AtomicUsize,
}

impl MockUserRepo {
    pub fn with_user(user: User) -> Self {
        let repo = Self::default();
        repo.next_id
            .store(i64::from(user.id) as usize, Ordering::SeqCst);
        repo.users.lock().unwrap().insert(i64::from(user.id), user);
        repo
    }
}

#[async_trait]
impl UserRepository for MockUserRepo {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let user = User {
            id: UserId::new(id)?,
            username: new_user.username,
            display_name: new_user.display_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        self.users.lock().unwrap().insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&i64::from(update.id)) else {
            return Ok(None);
        };
        if let Some(display_name) = update.display_name {
            user.display_name = display_name;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        Ok(Some(user.clone()))
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.username.as_str() == username.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&i64::from(id)).cloned())
    }
}

// --- security ------------------------------------------------------------

/// Deterministic "hash" so tests can assert verification without argon2.
#[derive(Default)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

#[derive(Default)]
pub struct StaticTokenManager;

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = Utc::now();
        Ok(AuthTokenDto {
            token: format!("token-{}", subject.username),
            issued_at: now,
            expires_at: now + chrono::Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, _token: &str) -> ApplicationResult<AuthenticatedUser> {
        Err(ApplicationError::unauthorized(
            "static token manager cannot authenticate",
        ))
    }
}
