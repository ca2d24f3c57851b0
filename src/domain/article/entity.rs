// src/domain/article/entity.rs
use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::listing::{ListSpec, Listable, SortKey};
use crate::domain::record::{Record, Resource};
use crate::domain::slug::Slug;
use crate::domain::tag::TagId;
use crate::domain::user::UserId;
use crate::domain::values::{Body, Excerpt, ImagePath, Name, record_id};
use chrono::{DateTime, Utc};
use serde::Deserialize;

record_id!(ArticleId, "article");

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: Name,
    pub slug: Slug,
    pub excerpt: Option<Excerpt>,
    pub body: Body,
    pub image: Option<ImagePath>,
    pub category_id: CategoryId,
    pub author_id: UserId,
    pub tag_ids: Vec<TagId>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published = true;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.published = false;
        self.published_at = None;
        self.updated_at = now;
    }

    /// Replaces the tag set wholesale.
    pub fn replace_tags(&mut self, tag_ids: Vec<TagId>) {
        self.tag_ids = normalize_tags(tag_ids);
    }

    pub fn is_publicly_visible(&self) -> bool {
        self.published && self.deleted_at.is_none()
    }
}

pub fn normalize_tags(mut tag_ids: Vec<TagId>) -> Vec<TagId> {
    tag_ids.sort_unstable();
    tag_ids.dedup();
    tag_ids
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: Name,
    pub slug: Slug,
    pub excerpt: Option<Excerpt>,
    pub body: Body,
    pub image: Option<ImagePath>,
    pub category_id: CategoryId,
    pub author_id: UserId,
    pub tag_ids: Vec<TagId>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Extra listing filters for articles.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ArticleFilter {
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tag_id: Option<i64>,
}

impl ArticleFilter {
    pub fn published_only() -> Self {
        Self {
            published: Some(true),
            ..Self::default()
        }
    }
}

impl Listable for Article {
    fn record_id(&self) -> i64 {
        self.id.0
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn search_text(&self, column: &str) -> Option<&str> {
        match column {
            "title" => Some(self.title.as_str()),
            "excerpt" => self.excerpt.as_ref().map(Excerpt::as_str),
            "body" => Some(self.body.as_str()),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> SortKey<'_> {
        match column {
            "title" => SortKey::Text(self.title.as_str()),
            "slug" => SortKey::Text(self.slug.as_str()),
            "published_at" => SortKey::from(self.published_at),
            "views" => SortKey::Int(self.views),
            "created_at" => SortKey::Time(self.created_at),
            "updated_at" => SortKey::Time(self.updated_at),
            _ => SortKey::Int(self.id.0),
        }
    }
}

impl Record for Article {
    type New = NewArticle;
    type Filter = ArticleFilter;

    const RESOURCE: Resource = Resource::Article;
    const LIST: ListSpec = ListSpec {
        searchable: &["title", "excerpt", "body"],
        sortable: &[
            "id",
            "title",
            "slug",
            "published_at",
            "views",
            "created_at",
            "updated_at",
        ],
    };

    fn slug(&self) -> Option<&Slug> {
        Some(&self.slug)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn merge_counters(&mut self, stored: &Self) {
        self.views = stored.views;
    }

    fn from_new(id: i64, new: NewArticle) -> DomainResult<Self> {
        Ok(Self {
            id: ArticleId::new(id)?,
            title: new.title,
            slug: new.slug,
            excerpt: new.excerpt,
            body: new.body,
            image: new.image,
            category_id: new.category_id,
            author_id: new.author_id,
            tag_ids: normalize_tags(new.tag_ids),
            published: new.published,
            published_at: if new.published { new.published_at } else { None },
            views: 0,
            created_at: new.created_at,
            updated_at: new.updated_at,
            deleted_at: None,
        })
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }

    fn matches(&self, filter: &ArticleFilter) -> bool {
        filter.published.is_none_or(|p| p == self.published)
            && filter.category_id.is_none_or(|id| id == self.category_id.0)
            && filter
                .tag_id
                .is_none_or(|id| self.tag_ids.iter().any(|tag| tag.0 == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::new(1).unwrap(),
            title: Name::new("Robot Beroda").unwrap(),
            slug: Slug::new("robot-beroda").unwrap(),
            excerpt: None,
            body: Body::new("isi").unwrap(),
            image: None,
            category_id: CategoryId::new(1).unwrap(),
            author_id: UserId::new(1).unwrap(),
            tag_ids: vec![],
            published: false,
            published_at: None,
            views: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn publish_sets_state() {
        let mut article = sample_article();
        let now = Utc::now();
        article.publish(now);
        assert!(article.published);
        assert_eq!(article.published_at, Some(now));
        assert_eq!(article.updated_at, now);
    }

    #[test]
    fn unpublish_clears_timestamp() {
        let mut article = sample_article();
        let now = Utc::now();
        article.publish(now);
        let later = now + chrono::Duration::seconds(10);
        article.unpublish(later);
        assert!(!article.published);
        assert!(article.published_at.is_none());
        assert_eq!(article.updated_at, later);
    }

    #[test]
    fn replace_tags_dedupes_and_sorts() {
        let mut article = sample_article();
        article.replace_tags(vec![TagId(3), TagId(1), TagId(3)]);
        assert_eq!(article.tag_ids, vec![TagId(1), TagId(3)]);
        article.replace_tags(vec![]);
        assert!(article.tag_ids.is_empty());
    }

    #[test]
    fn filter_matches_published_category_and_tag() {
        let mut article = sample_article();
        article.replace_tags(vec![TagId(5)]);
        assert!(!article.matches(&ArticleFilter::published_only()));
        article.publish(Utc::now());
        assert!(article.matches(&ArticleFilter::published_only()));
        let filter = ArticleFilter {
            published: None,
            category_id: Some(1),
            tag_id: Some(5),
        };
        assert!(article.matches(&filter));
        let other_tag = ArticleFilter {
            tag_id: Some(6),
            ..filter
        };
        assert!(!article.matches(&other_tag));
    }

    #[test]
    fn new_drafts_drop_publish_timestamp() {
        let now = Utc::now();
        let new = NewArticle {
            title: Name::new("Draft").unwrap(),
            slug: Slug::new("draft").unwrap(),
            excerpt: None,
            body: Body::new("isi").unwrap(),
            image: None,
            category_id: CategoryId(1),
            author_id: UserId(1),
            tag_ids: vec![TagId(2), TagId(2)],
            published: false,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        };
        let article = Article::from_new(9, new).unwrap();
        assert!(article.published_at.is_none());
        assert_eq!(article.tag_ids, vec![TagId(2)]);
        assert_eq!(article.views, 0);
    }
}
