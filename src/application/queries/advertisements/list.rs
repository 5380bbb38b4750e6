use super::{common, service::AdvertisementQueryService};
use crate::{
    application::{
        dto::{AdvertisementDto, AuthenticatedUser, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        advertisement::{
            AdStatus, AdvertisementCursor, AdvertisementListFilter,
        },
        article::ArticleId,
    },
};

pub struct ListAdvertisementsQuery {
    pub article_id: Option<i64>,
    pub status: Option<String>,
    pub include_deleted: bool,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl AdvertisementQueryService {
    pub async fn list_advertisements(
        &self,
        actor: &AuthenticatedUser,
        query: ListAdvertisementsQuery,
    ) -> ApplicationResult<CursorPage<AdvertisementDto>> {
        let visibility = common::resolve_visibility(actor, query.include_deleted)?;
        let limit = common::normalize_limit(query.limit);

        let filter = AdvertisementListFilter {
            article_id: query
                .article_id
                .map(ArticleId::new)
                .transpose()
                .map_err(ApplicationError::from)?,
            status: query
                .status
                .as_deref()
                .map(str::parse::<AdStatus>)
                .transpose()
                .map_err(ApplicationError::from)?,
        };
        let cursor = query
            .cursor
            .as_deref()
            .map(AdvertisementCursor::decode)
            .transpose()
            .map_err(ApplicationError::from)?;

        let (records, next_cursor) = self
            .repo
            .list_page(filter, visibility, limit, cursor)
            .await
            .map_err(ApplicationError::from)?;
        let total = self
            .repo
            .count(filter, visibility)
            .await
            .map_err(ApplicationError::from)?;

        let now = self.clock.now();
        let items = records
            .into_iter()
            .map(|ad| AdvertisementDto::from_entity(ad, now))
            .collect();
        Ok(
            CursorPage::new(items, next_cursor.map(|cursor| cursor.encode()))
                .with_total(total),
        )
    }
}
