use super::ArticleQueryService;
use crate::application::{
    dto::{ArticleDto, AuthenticatedUser, CursorPage},
    error::ApplicationResult,
};

pub struct ListArticlesQuery {
    pub include_drafts: bool,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        let (include_drafts, limit) =
            self.normalize_listing(actor, query.include_drafts, query.limit)?;
        let cursor = self.decode_cursor(query.cursor.as_deref())?;

        let (records, next_cursor) = self
            .read_repo
            .list_page(include_drafts, limit, cursor)
            .await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(CursorPage::new(
            items,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }
}
