mod capability;
mod create;
mod delete;
mod publish;
mod service;
mod update;

pub use create::{CreateArticleCommand, DestinationInput, FaqInput, SeoInput};
pub use delete::DeleteArticleCommand;
pub use publish::SetPublishStateCommand;
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
