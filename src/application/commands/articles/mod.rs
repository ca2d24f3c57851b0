// src/application/commands/articles/mod.rs
mod create;
mod publish;
mod update;

pub use create::CreateArticleCommand;
pub use publish::SetPublishStateCommand;
pub use update::UpdateArticleCommand;

use super::records::RecordCommandService;
use crate::{application::dto::ArticleDto, domain::article::Article};

pub type ArticleCommandService = RecordCommandService<Article>;

impl super::records::ManagedRecord for Article {
    type Dto = ArticleDto;
    type Create = CreateArticleCommand;
    type Update = UpdateArticleCommand;
}
