// src/domain/record.rs
use crate::domain::errors::DomainResult;
use crate::domain::listing::{ListQuery, ListSpec, Listable, Page, Trashed};
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Manageable collections, named by their permission noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Article,
    Category,
    Tag,
    Division,
    SubDivision,
    Staff,
    Product,
    Gallery,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Article,
        Resource::Category,
        Resource::Tag,
        Resource::Division,
        Resource::SubDivision,
        Resource::Staff,
        Resource::Product,
        Resource::Gallery,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Resource::Article => "artikel",
            Resource::Category => "kategori",
            Resource::Tag => "tag",
            Resource::Division => "divisi",
            Resource::SubDivision => "sub divisi",
            Resource::Staff => "pengurus",
            Resource::Product => "produk",
            Resource::Gallery => "galeri",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Restore,
    Publish,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Restore => "restore",
            Action::Publish => "publish",
        }
    }
}

/// Permission name as stored by the access-control tables, e.g. `edit kategori`.
pub fn permission(action: Action, resource: Resource) -> String {
    format!("{} {}", action.as_str(), resource.label())
}

/// Filter type for collections without extra list filters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NoFilter {}

/// Common shape of every manageable entity.
pub trait Record: Listable + Clone + Send + Sync + 'static {
    type New: Send + Sync + 'static;
    type Filter: Default + Send + Sync + 'static;

    const RESOURCE: Resource;
    const LIST: ListSpec;

    fn id(&self) -> i64 {
        self.record_id()
    }

    fn slug(&self) -> Option<&Slug> {
        None
    }

    fn touch(&mut self, now: DateTime<Utc>);

    /// Builds the stored form of a new record once an id is assigned.
    fn from_new(id: i64, new: Self::New) -> DomainResult<Self>;

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>);

    /// Copies columns maintained outside edits (counters) from the stored row.
    fn merge_counters(&mut self, _stored: &Self) {}

    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }
}

#[async_trait]
pub trait RecordRepository<R: Record>: Send + Sync {
    async fn insert(&self, new: R::New) -> DomainResult<R>;
    /// Persists every mutable column of `record`, associations included.
    async fn update(&self, record: &R) -> DomainResult<R>;
    async fn find_by_id(&self, id: i64, trashed: Trashed) -> DomainResult<Option<R>>;
    /// Live records only.
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<R>>;
    async fn list(&self, query: &ListQuery, filter: &R::Filter) -> DomainResult<Page<R>>;
    async fn soft_delete(&self, id: i64, at: DateTime<Utc>) -> DomainResult<()>;
    async fn restore(&self, id: i64, at: DateTime<Utc>) -> DomainResult<R>;
    /// Permanently removes a trashed record.
    async fn purge(&self, id: i64) -> DomainResult<()>;
}
