pub mod cursor;
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use cursor::ArticleListCursor;
pub use entity::{Article, ArticleUpdate, NewArticle, PublishStateUpdate};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use value_objects::{
    ArticleBody, ArticleId, ArticleSlug, ArticleTitle, Destination, FaqEntry, SeoMetadata,
};
