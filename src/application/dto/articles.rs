use crate::domain::article::Article;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub image: Option<String>,
    pub category_id: i64,
    pub author_id: i64,
    pub tag_ids: Vec<i64>,
    pub published: bool,
    #[serde(with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            excerpt: article.excerpt.map(|e| e.into_inner()),
            body: article.body.into_inner(),
            image: article.image.map(|i| i.into_inner()),
            category_id: article.category_id.into(),
            author_id: article.author_id.into(),
            tag_ids: article.tag_ids.into_iter().map(Into::into).collect(),
            published: article.published,
            published_at: article.published_at,
            views: article.views,
            created_at: article.created_at,
            updated_at: article.updated_at,
            deleted_at: article.deleted_at,
        }
    }
}
