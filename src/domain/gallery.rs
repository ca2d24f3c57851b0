// src/domain/gallery.rs
use crate::domain::errors::DomainResult;
use crate::domain::listing::{ListSpec, Listable, SortKey};
use crate::domain::record::{NoFilter, Record, Resource};
use crate::domain::values::{Description, ImagePath, Name, record_id};
use chrono::{DateTime, Utc};

record_id!(GalleryId, "gallery");

/// A single gallery photo; the image reference is mandatory.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub id: GalleryId,
    pub title: Name,
    pub description: Option<Description>,
    pub image: ImagePath,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewGallery {
    pub title: Name,
    pub description: Option<Description>,
    pub image: ImagePath,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listable for Gallery {
    fn record_id(&self) -> i64 {
        self.id.0
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn search_text(&self, column: &str) -> Option<&str> {
        match column {
            "title" => Some(self.title.as_str()),
            "description" => self.description.as_ref().map(Description::as_str),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> SortKey<'_> {
        match column {
            "title" => SortKey::Text(self.title.as_str()),
            "created_at" => SortKey::Time(self.created_at),
            "updated_at" => SortKey::Time(self.updated_at),
            _ => SortKey::Int(self.id.0),
        }
    }
}

impl Record for Gallery {
    type New = NewGallery;
    type Filter = NoFilter;

    const RESOURCE: Resource = Resource::Gallery;
    const LIST: ListSpec = ListSpec {
        searchable: &["title", "description"],
        sortable: &["id", "title", "created_at", "updated_at"],
    };

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn from_new(id: i64, new: NewGallery) -> DomainResult<Self> {
        Ok(Self {
            id: GalleryId::new(id)?,
            title: new.title,
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
