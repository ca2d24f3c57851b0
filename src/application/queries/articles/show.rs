use super::PublicArticleService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::Slug,
};
use tracing::debug;

impl PublicArticleService {
    /// Fetches a published article and counts the read.
    pub async fn show_by_slug(&self, slug: &str) -> ApplicationResult<ArticleDto> {
        let not_found = || ApplicationError::not_found("article not found");
        let slug = Slug::new(slug).map_err(|_| not_found())?;

        let mut article = self
            .articles
            .find_by_slug(&slug)
            .await?
            .filter(|article| article.is_publicly_visible())
            .ok_or_else(not_found)?;

        article.views = self
            .views
            .record_view(article.id)
            .await?
            .ok_or_else(not_found)?;
        debug!(id = %article.id, views = article.views, "article viewed");
        Ok(article.into())
    }
}
