mod list;
mod show;

pub use list::PublicArticleFilter;

use std::sync::Arc;

use crate::domain::{
    article::{Article, ArticleViewCounter},
    category::Category,
    record::RecordRepository,
    tag::Tag,
};

/// Published articles as the public site sees them.
pub struct PublicArticleService {
    pub(super) articles: Arc<dyn RecordRepository<Article>>,
    pub(super) categories: Arc<dyn RecordRepository<Category>>,
    pub(super) tags: Arc<dyn RecordRepository<Tag>>,
    pub(super) views: Arc<dyn ArticleViewCounter>,
    pub(super) default_per_page: u32,
}

impl PublicArticleService {
    pub fn new(
        articles: Arc<dyn RecordRepository<Article>>,
        categories: Arc<dyn RecordRepository<Category>>,
        tags: Arc<dyn RecordRepository<Tag>>,
        views: Arc<dyn ArticleViewCounter>,
        default_per_page: u32,
    ) -> Self {
        Self {
            articles,
            categories,
            tags,
            views,
            default_per_page,
        }
    }
}
