// src/domain/tag.rs
use crate::domain::errors::DomainResult;
use crate::domain::listing::{ListSpec, Listable, SortKey};
use crate::domain::record::{NoFilter, Record, Resource};
use crate::domain::slug::Slug;
use crate::domain::values::{Name, record_id};
use chrono::{DateTime, Utc};

record_id!(TagId, "tag");

#[derive(Debug, Clone)]
pub struct Tag {
    pub id: TagId,
    pub name: Name,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: Name,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listable for Tag {
    fn record_id(&self) -> i64 {
        self.id.0
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn search_text(&self, column: &str) -> Option<&str> {
        (column == "name").then(|| self.name.as_str())
    }

    fn sort_key(&self, column: &str) -> SortKey<'_> {
        match column {
            "name" => SortKey::Text(self.name.as_str()),
            "slug" => SortKey::Text(self.slug.as_str()),
            "created_at" => SortKey::Time(self.created_at),
            "updated_at" => SortKey::Time(self.updated_at),
            _ => SortKey::Int(self.id.0),
        }
    }
}

impl Record for Tag {
    type New = NewTag;
    type Filter = NoFilter;

    const RESOURCE: Resource = Resource::Tag;
    const LIST: ListSpec = ListSpec {
        searchable: &["name"],
        sortable: &["id", "name", "slug", "created_at", "updated_at"],
    };

    fn slug(&self) -> Option<&Slug> {
        Some(&self.slug)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn from_new(id: i64, new: NewTag) -> DomainResult<Self> {
        Ok(Self {
            id: TagId::new(id)?,
            name: new.name,
            slug: new.slug,
            created_at: new.created_at,
            updated_at: new.updated_at,
            deleted_at: None,
        })
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }
}
