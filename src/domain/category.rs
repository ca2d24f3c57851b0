// src/domain/category.rs
use crate::domain::errors::DomainResult;
use crate::domain::listing::{ListSpec, Listable, SortKey};
use crate::domain::record::{NoFilter, Record, Resource};
use crate::domain::slug::Slug;
use crate::domain::values::{Description, ImagePath, Name, record_id};
use chrono::{DateTime, Utc};

record_id!(CategoryId, "category");

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: Name,
    pub slug: Slug,
    pub description: Option<Description>,
    pub image: Option<ImagePath>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: Name,
    pub slug: Slug,
    pub description: Option<Description>,
    pub image: Option<ImagePath>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listable for Category {
    fn record_id(&self) -> i64 {
        self.id.0
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn search_text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(self.name.as_str()),
            "description" => self.description.as_ref().map(Description::as_str),
            _ => None,
        }
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

impl Record for Category {
    type New = NewCategory;
    type Filter = NoFilter;

    const RESOURCE: Resource = Resource::Category;
    const LIST: ListSpec = ListSpec {
        searchable: &["name", "description"],
        sortable: &["id", "name", "slug", "created_at", "updated_at"],
    };

    fn slug(&self) -> Option<&Slug> {
        Some(&self.slug)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn from_new(id: i64, new: NewCategory) -> DomainResult<Self> {
        Ok(Self {
            id: CategoryId::new(id)?,
            name: new.name,
            slug: new.slug,
            description: new.description,
            image: new.image,
            created_at: new.created_at,
            updated_at: new.updated_at,
            deleted_at: None,
        })
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }
}
