pub mod entity;
pub mod repository;

pub use entity::{Article, ArticleFilter, ArticleId, NewArticle};
pub use repository::ArticleViewCounter;
